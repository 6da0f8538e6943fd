//! Minimum-duration animator for loading transitions.
//!
//! DESIGN
//! ======
//! Fast backend responses must not flash the loading step for a single
//! frame, so every network transition joins its request with this delay.
//! Flavor updates swap the two-line status display partway through; they
//! are purely cosmetic and never affect control flow.

use std::time::Duration;

use tokio::time::sleep;

/// Two-line status display written to while a loading step is visible.
pub trait StatusSink: Send + Sync {
    /// Update the loading display. `title: None` keeps the current title.
    fn status(&self, title: Option<&str>, subtitle: &str);
}

/// A scheduled status swap at an offset from the start of the delay.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub at: Duration,
    pub title: Option<String>,
    pub subtitle: String,
}

/// Sleep for `total`, applying `updates` at their offsets along the way.
///
/// Updates past `total` are clamped to it; out-of-order offsets are applied
/// as soon as they are due. Resolves only once `total` has fully elapsed.
pub async fn run(total: Duration, updates: &[StatusUpdate], sink: &dyn StatusSink) {
    let mut elapsed = Duration::ZERO;
    for update in updates {
        let at = update.at.min(total);
        if at > elapsed {
            sleep(at - elapsed).await;
            elapsed = at;
        }
        sink.status(update.title.as_deref(), &update.subtitle);
    }
    if total > elapsed {
        sleep(total - elapsed).await;
    }
}

#[cfg(test)]
#[path = "animator_test.rs"]
mod tests;
