//! Page chrome — confirmation dialogs and flash messages.
//!
//! The portal renders these outside any wizard: destructive actions ask
//! for confirmation before submitting, and server-side flash messages
//! surface once on page load. A rich dialog provider may be installed;
//! without one, confirmations fall back to the native prompt.

use async_trait::async_trait;

pub const DEFAULT_CONFIRM_MESSAGE: &str = "¿Está seguro?";

/// Visual weight of a confirmation, derived from the triggering action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTone {
    /// Irreversible deletions.
    Danger,
    /// State changes worth a second look.
    Warn,
    Neutral,
}

impl ConfirmTone {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Danger => "Confirmar eliminación",
            Self::Warn => "Confirmar cambio",
            Self::Neutral => "Confirmación",
        }
    }

    #[must_use]
    pub fn confirm_label(self) -> &'static str {
        match self {
            Self::Danger => "Sí, eliminar",
            Self::Warn | Self::Neutral => "Sí, continuar",
        }
    }
}

/// One pending confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub message: String,
    pub tone: ConfirmTone,
}

impl ConfirmRequest {
    /// Empty messages degrade to the generic prompt.
    #[must_use]
    pub fn new(message: &str, tone: ConfirmTone) -> Self {
        let message = if message.trim().is_empty() {
            DEFAULT_CONFIRM_MESSAGE.to_string()
        } else {
            message.to_string()
        };
        Self { message, tone }
    }
}

/// Yes/no prompt seam. The rich implementation shows a styled dialog;
/// the native one blocks on the platform prompt.
#[async_trait]
pub trait ConfirmProvider: Send + Sync {
    async fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Ask the rich provider when one is installed, the native prompt
/// otherwise. The action proceeds only on an explicit yes.
pub async fn confirm_or_native(
    rich: Option<&dyn ConfirmProvider>,
    native: &dyn ConfirmProvider,
    request: &ConfirmRequest,
) -> bool {
    match rich {
        Some(provider) => provider.confirm(request).await,
        None => native.confirm(request).await,
    }
}

// =============================================================================
// FLASH MESSAGES
// =============================================================================

/// Kind of a server-issued flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Warning,
    Info,
}

impl FlashKind {
    /// Parse the page-embedded kind attribute. Unknown or missing kinds
    /// present as informational.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Listo",
            Self::Error => "Error",
            Self::Warning => "Atención",
            Self::Info => "Información",
        }
    }
}

#[cfg(test)]
#[path = "chrome_test.rs"]
mod tests;
