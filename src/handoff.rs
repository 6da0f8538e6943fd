//! Single-shot handoff flows.
//!
//! The admin login and password-change forms are not wizards: they
//! validate locally, hold the loading step for the configured floor, then
//! hand the still-unmodified form to a page-level submitter which performs
//! a full navigation. Validation failure never reaches the submitter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

// =============================================================================
// SUBMITTER SEAM
// =============================================================================

/// Page-level form submission; the real one navigates away.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self);
}

/// The two states a handoff form can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffStep {
    Form,
    Loading,
}

struct SingleShot {
    floor: Duration,
    submitter: Arc<dyn FormSubmitter>,
    step: HandoffStep,
    error: Option<String>,
}

impl SingleShot {
    fn new(floor: Duration, submitter: Arc<dyn FormSubmitter>) -> Self {
        Self { floor, submitter, step: HandoffStep::Form, error: None }
    }

    fn fail(&mut self, message: &str) {
        tracing::warn!(%message, "handoff validation failed");
        self.error = Some(message.to_string());
        self.step = HandoffStep::Form;
    }

    async fn engage(&mut self) {
        self.error = None;
        self.step = HandoffStep::Loading;
        tokio::time::sleep(self.floor).await;
        self.submitter.submit().await;
    }
}

// =============================================================================
// LOGIN
// =============================================================================

pub struct LoginHandoff {
    inner: SingleShot,
}

impl LoginHandoff {
    #[must_use]
    pub fn new(floor: Duration, submitter: Arc<dyn FormSubmitter>) -> Self {
        Self { inner: SingleShot::new(floor, submitter) }
    }

    /// Validate credentials presence, then hand off. Both fields are
    /// trimmed first; either one empty keeps the form visible.
    pub async fn submit(&mut self, user: &str, pass: &str) {
        if user.trim().is_empty() || pass.trim().is_empty() {
            self.inner.fail("Debe ingresar usuario y contraseña.");
            return;
        }
        self.inner.engage().await;
    }

    #[must_use]
    pub fn step(&self) -> HandoffStep {
        self.inner.step
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.inner.error.as_deref()
    }
}

// =============================================================================
// PASSWORD CHANGE
// =============================================================================

pub struct ChangePasswordHandoff {
    inner: SingleShot,
}

impl ChangePasswordHandoff {
    #[must_use]
    pub fn new(floor: Duration, submitter: Arc<dyn FormSubmitter>) -> Self {
        Self { inner: SingleShot::new(floor, submitter) }
    }

    /// Both entries present and equal, then hand off. Password policy
    /// itself is enforced server-side after navigation.
    pub async fn submit(&mut self, new_pass: &str, confirm_pass: &str) {
        let p1 = new_pass.trim();
        let p2 = confirm_pass.trim();
        if p1.is_empty() || p2.is_empty() {
            self.inner.fail("Debe ingresar y confirmar la contrasena.");
            return;
        }
        if p1 != p2 {
            self.inner.fail("Las contrasenas no coinciden.");
            return;
        }
        self.inner.engage().await;
    }

    #[must_use]
    pub fn step(&self) -> HandoffStep {
        self.inner.step
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.inner.error.as_deref()
    }
}

#[cfg(test)]
#[path = "handoff_test.rs"]
mod tests;
