//! Per-instance flow state.
//!
//! Each wizard instance owns one [`FlowState`]; instances never share
//! state, so one flow's failure cannot leak into another.

use uuid::Uuid;

use crate::wire::SubjectRecord;

/// The stages a flow can be in. Admin flows use a subset; `Loading` is
/// entered and left only inside a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Form,
    Birthdate,
    Text,
    Confirm,
    Loading,
    Ready,
    Error,
}

/// What the generation call will be keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Opaque verification token, redeemable at most once (self-service).
    Token(String),
    /// Digits-only document number (admin).
    Number(String),
    /// Number plus normalized free text (admin special).
    NumberWithText { numero: String, texto: String },
}

/// Fields that can carry a local validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Document,
    Birthdate,
    Text,
}

/// Field-local validation or verification error, shown in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Document identity as entered on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInput {
    pub tipo: String,
    pub numero: String,
}

/// Everything the Ready step renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub nombre: String,
    pub doc_label: String,
    pub codigo: String,
    pub download_url: String,
    pub view_url: String,
    pub verify_url: String,
    pub message: String,
}

// =============================================================================
// FLOW STATE
// =============================================================================

#[derive(Debug)]
pub struct FlowState {
    pub step: Step,
    pub subject: Option<SubjectRecord>,
    pub continuation: Option<Continuation>,
    pub pending_text: Option<String>,
    pub document: DocumentInput,
    /// Whether this run went through the secondary birthdate check.
    pub passed_birthdate: bool,
    /// Submitting controls of the initial form; locked during transitions.
    pub controls_enabled: bool,
    pub field_error: Option<FieldError>,
    /// Message for the terminal error step.
    pub error_message: Option<String>,
    pub ready: Option<ReadyView>,
    /// Identifies the current run; results from transitions started under
    /// an older id are dropped instead of applied.
    pub run: Uuid,
}

impl FlowState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::Form,
            subject: None,
            continuation: None,
            pending_text: None,
            document: DocumentInput::default(),
            passed_birthdate: false,
            controls_enabled: true,
            field_error: None,
            error_message: None,
            ready: None,
            run: Uuid::new_v4(),
        }
    }

    /// Back to initial values under a fresh run id. A transition still in
    /// flight when this runs will see its result ignored.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}
