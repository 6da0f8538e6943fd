//! Step display — mutually exclusive view-region projection.
//!
//! One region per step, exactly one visible at a time. The controller only
//! talks in step keys; the [`ViewBinding`] maps region names to whatever
//! surface hosts them (DOM, terminal, test recorder).

use std::sync::Arc;

/// Visibility surface for named regions.
pub trait ViewBinding: Send + Sync {
    fn set_visible(&self, region: &str, visible: bool);
}

/// Binding that drops all visibility changes. Useful for headless runs.
pub struct NullBinding;

impl ViewBinding for NullBinding {
    fn set_visible(&self, _region: &str, _visible: bool) {}
}

// =============================================================================
// STEP DISPLAY
// =============================================================================

/// Projects one flow's current step onto its registered regions.
pub struct StepDisplay<K: Copy + Eq + std::fmt::Debug> {
    regions: Vec<(K, String)>,
    visible: Option<K>,
    binding: Arc<dyn ViewBinding>,
}

impl<K: Copy + Eq + std::fmt::Debug> StepDisplay<K> {
    #[must_use]
    pub fn new(regions: Vec<(K, String)>, binding: Arc<dyn ViewBinding>) -> Self {
        Self { regions, visible: None, binding }
    }

    /// Show exactly one region, hiding every other registered one.
    ///
    /// Showing a step with no registered region is a no-op; the flow
    /// configuration decides which steps exist.
    pub fn show(&mut self, step: K) {
        if !self.regions.iter().any(|(key, _)| *key == step) {
            tracing::warn!(?step, "step has no registered region");
            return;
        }
        for (key, region) in &self.regions {
            self.binding.set_visible(region, *key == step);
        }
        self.visible = Some(step);
    }

    /// The currently visible step, if any has been shown yet.
    #[must_use]
    pub fn visible(&self) -> Option<K> {
        self.visible
    }
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
