//! Workflow controller — the finite-state core of one wizard instance.
//!
//! DESIGN
//! ======
//! Every network-backed transition follows the same protocol: validate
//! locally, lock the submitting controls, show the loading step, then run
//! the gateway call and the minimum-duration animator concurrently and
//! join. The joined result is classified into the next step. A transition
//! is keyed by the run id captured at its start; `apply` drops results
//! whose run id no longer matches, so a response that lands after the user
//! reset the flow cannot resurrect discarded state.
//!
//! TRADE-OFFS
//! ==========
//! Transitions are split into a synchronous start (`Effect::Pending`) and
//! an explicit `apply` instead of one `&mut self` async method. That keeps
//! the controller free for user actions while a request is in flight,
//! which is exactly the window the stale-result check exists for.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use crate::animator::{self, StatusSink, StatusUpdate};
use crate::display::{StepDisplay, ViewBinding};
use crate::gateway::Gateway;
use crate::input;
use crate::wire::{
    Envelope, Failure, GenerateOutcome, VerifyOutcome, classify_generate, classify_verify,
};

use super::config::{ContinuationKind, EndpointSpec, FailurePresentation, FlowConfig};
use super::state::{Continuation, DocumentInput, Field, FieldError, FlowState, ReadyView, Step};

// =============================================================================
// EFFECTS
// =============================================================================

/// What a user action produced.
#[must_use]
pub enum Effect {
    /// State and display were updated synchronously.
    Settled,
    /// Local validation failed; no network call was made.
    Invalid(FieldError),
    /// A transition is in flight: `resolve()` it, then feed the outcome
    /// back through [`FlowController::apply`].
    Pending(PendingTransition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    VerifyPrimary,
    VerifySecondary,
    Generate,
}

/// One outstanding network transition, detached from the controller borrow.
pub struct PendingTransition {
    run: Uuid,
    kind: TransitionKind,
    path: String,
    body: serde_json::Value,
    updates: Vec<StatusUpdate>,
    total: Duration,
    gateway: Arc<dyn Gateway>,
    sink: Arc<dyn StatusSink>,
}

impl PendingTransition {
    /// Run the gateway call and the animator concurrently and join.
    ///
    /// The outcome is available no earlier than the configured duration and
    /// no later than the slower of the two joined operations.
    pub async fn resolve(self) -> TransitionOutcome {
        let Self { run, kind, path, body, updates, total, gateway, sink } = self;
        let (envelope, ()) =
            tokio::join!(gateway.send(&path, body), animator::run(total, &updates, sink.as_ref()));
        TransitionOutcome { run, kind, envelope }
    }
}

/// Joined result of one transition, tagged with the run it belongs to.
pub struct TransitionOutcome {
    run: Uuid,
    kind: TransitionKind,
    envelope: Envelope,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct FlowController {
    config: FlowConfig,
    state: FlowState,
    display: StepDisplay<Step>,
    gateway: Arc<dyn Gateway>,
    sink: Arc<dyn StatusSink>,
}

impl FlowController {
    #[must_use]
    pub fn new(
        config: FlowConfig,
        gateway: Arc<dyn Gateway>,
        sink: Arc<dyn StatusSink>,
        binding: Arc<dyn ViewBinding>,
    ) -> Self {
        let mut display = StepDisplay::new(config.regions.clone(), binding);
        display.show(Step::Form);
        Self { config, state: FlowState::new(), display, gateway, sink }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    // -------------------------------------------------------------------------
    // User actions
    // -------------------------------------------------------------------------

    /// First-step submission: document type (where the flow asks for one)
    /// and digits-only number, then primary verification.
    pub fn submit_document(&mut self, tipo: &str, numero: &str) -> Effect {
        self.state.field_error = None;
        let tipo = tipo.trim().to_uppercase();
        let numero = input::digits_only(numero);

        if (self.config.requires_doc_type && tipo.is_empty()) || numero.is_empty() {
            return self.invalid(Field::Document, self.config.copy.missing_document.clone());
        }
        if self.config.enforce_number_length && !input::doc_number_length_ok(&numero) {
            return self.invalid(Field::Document, self.config.copy.invalid_length.clone());
        }

        let body = if self.config.requires_doc_type {
            json!({ "tipo": tipo, "numero": numero })
        } else {
            json!({ "numero": numero })
        };
        self.state.document = DocumentInput { tipo, numero };

        tracing::info!(flow = self.config.name, "primary verification submitted");
        let endpoint = self.config.verify.clone();
        self.start_network(TransitionKind::VerifyPrimary, &endpoint, body)
    }

    /// Secondary birthdate verification (self-service flow only).
    pub fn submit_birthdate(&mut self, iso: &str) -> Effect {
        let Some(endpoint) = self.config.secondary.clone() else {
            tracing::warn!(flow = self.config.name, "flow has no birthdate step");
            return Effect::Settled;
        };
        self.state.field_error = None;
        let iso = iso.trim();

        if iso.is_empty() {
            return self.invalid(Field::Birthdate, self.config.copy.missing_birthdate.clone());
        }
        if !input::is_iso_date(iso) {
            return self.invalid(Field::Birthdate, self.config.copy.invalid_birthdate.clone());
        }

        let body = json!({
            "tipo": self.state.document.tipo,
            "numero": self.state.document.numero,
            "birthdate": iso,
        });
        tracing::info!(flow = self.config.name, "birthdate verification submitted");
        self.start_network(TransitionKind::VerifySecondary, &endpoint, body)
    }

    /// Free-text step (special flow only): normalize, preview, confirm.
    /// No network call is involved.
    pub fn submit_text(&mut self, raw: &str) -> Effect {
        if !self.config.has_text_step {
            tracing::warn!(flow = self.config.name, "flow has no text step");
            return Effect::Settled;
        }
        if self.state.subject.is_none() {
            self.show(Step::Form);
            return Effect::Settled;
        }
        self.state.field_error = None;

        let texto = input::capitalize_first(raw);
        if texto.is_empty() {
            return self.invalid(Field::Text, self.config.copy.missing_text.clone());
        }
        self.state.pending_text = Some(texto);
        self.show(Step::Confirm);
        Effect::Settled
    }

    /// Confirmed generation. Without a held continuation (two tabs, an
    /// external race) the controller returns to the form instead of calling
    /// the generation endpoint with an empty key.
    pub fn confirm_generate(&mut self) -> Effect {
        let Some(body) = self.continuation_body() else {
            tracing::warn!(flow = self.config.name, "confirmed without continuation; back to form");
            self.show(Step::Form);
            return Effect::Settled;
        };
        tracing::info!(flow = self.config.name, "generation confirmed");
        let endpoint = self.config.generate.clone();
        self.start_network(TransitionKind::Generate, &endpoint, body)
    }

    /// Back from the confirmation step. The special flow returns to its
    /// text step keeping the entered text (only the error banner clears);
    /// the self-service flow returns to the birthdate step when one was
    /// answered; otherwise back lands on the form.
    pub fn go_back(&mut self) -> Effect {
        match self.state.step {
            Step::Confirm => {
                self.state.continuation = None;
                if self.config.has_text_step {
                    self.state.field_error = None;
                    self.show(Step::Text);
                } else if self.config.secondary.is_some() && self.state.passed_birthdate {
                    self.show(Step::Birthdate);
                } else {
                    self.show(Step::Form);
                }
            }
            Step::Text => self.reset(),
            other => tracing::debug!(step = ?other, "back ignored on this step"),
        }
        Effect::Settled
    }

    /// Reset to the initial step under a fresh run id, discarding subject,
    /// continuation and pending text. Also serves "otra consulta" and the
    /// error step's retry action.
    pub fn reset(&mut self) {
        tracing::info!(flow = self.config.name, "flow reset");
        self.state.reset();
        self.show(Step::Form);
    }

    // -------------------------------------------------------------------------
    // Transition protocol
    // -------------------------------------------------------------------------

    fn start_network(
        &mut self,
        kind: TransitionKind,
        endpoint: &EndpointSpec,
        body: serde_json::Value,
    ) -> Effect {
        self.state.controls_enabled = false;
        self.sink.status(Some(&endpoint.loading.title), &endpoint.loading.subtitle);
        self.show(Step::Loading);
        Effect::Pending(PendingTransition {
            run: self.state.run,
            kind,
            path: endpoint.path.clone(),
            body,
            updates: endpoint.loading.updates.clone(),
            total: endpoint.loading.total,
            gateway: Arc::clone(&self.gateway),
            sink: Arc::clone(&self.sink),
        })
    }

    /// Apply a joined transition result. Results from a run abandoned by
    /// reset are dropped untouched.
    pub fn apply(&mut self, outcome: TransitionOutcome) {
        if outcome.run != self.state.run {
            tracing::debug!(flow = self.config.name, "stale transition result dropped");
            return;
        }
        match outcome.kind {
            TransitionKind::VerifyPrimary => self.apply_verify(&outcome.envelope, true),
            TransitionKind::VerifySecondary => self.apply_verify(&outcome.envelope, false),
            TransitionKind::Generate => self.apply_generate(&outcome.envelope),
        }
    }

    /// Resolve-and-apply convenience for drivers that do not interleave
    /// other actions while a transition is in flight.
    pub async fn settle(&mut self, effect: Effect) {
        if let Effect::Pending(pending) = effect {
            let outcome = pending.resolve().await;
            self.apply(outcome);
        }
    }

    fn apply_verify(&mut self, envelope: &Envelope, primary: bool) {
        let endpoint = if primary {
            &self.config.verify
        } else {
            self.config.secondary.as_ref().unwrap_or(&self.config.verify)
        };
        let fallback = endpoint.fallback_message.clone();
        let mode = endpoint.failure;

        match classify_verify(envelope, &fallback) {
            VerifyOutcome::Rejected(failure) => self.present_failure(mode, &failure),
            VerifyOutcome::RequiresBirthdate { subject } => {
                if primary && self.config.secondary.is_some() {
                    self.state.subject = Some(subject);
                    self.state.passed_birthdate = true;
                    self.state.field_error = None;
                    self.show(Step::Birthdate);
                } else {
                    // A flow without a birthdate step cannot satisfy this.
                    tracing::warn!(flow = self.config.name, "unexpected requires_birthdate");
                    let failure = Failure { message: fallback, retry_after_seconds: None };
                    self.present_failure(mode, &failure);
                }
            }
            VerifyOutcome::Verified { token, token_expires_in, subject } => {
                if let Some(secs) = token_expires_in {
                    tracing::debug!(expires_in = secs, "verification token issued");
                }
                if self.config.continuation == ContinuationKind::Token {
                    match token {
                        Some(token) if !token.is_empty() => {
                            self.state.continuation = Some(Continuation::Token(token));
                        }
                        _ => {
                            tracing::warn!(flow = self.config.name, "verified without a token");
                            let failure = Failure { message: fallback, retry_after_seconds: None };
                            self.present_failure(mode, &failure);
                            return;
                        }
                    }
                }
                self.state.subject = Some(subject);
                let next = if self.config.has_text_step { Step::Text } else { Step::Confirm };
                self.show(next);
            }
        }
    }

    fn apply_generate(&mut self, envelope: &Envelope) {
        let fallback = self.config.generate.fallback_message.clone();
        let mode = self.config.generate.failure;

        match classify_generate(envelope, &fallback) {
            GenerateOutcome::Rejected(failure) => self.present_failure(mode, &failure),
            GenerateOutcome::Generated(issued) => {
                let subject = issued
                    .subject
                    .or_else(|| self.state.subject.clone())
                    .unwrap_or_default();
                let message = if issued.recently_generated {
                    self.config.copy.ready_recent.clone()
                } else {
                    self.config.copy.ready_default.clone()
                };
                tracing::info!(
                    flow = self.config.name,
                    codigo = %issued.codigo,
                    recent = issued.recently_generated,
                    "certificate ready"
                );
                self.state.ready = Some(ReadyView {
                    nombre: subject.nombre.clone(),
                    doc_label: subject.doc_label(),
                    codigo: issued.codigo,
                    download_url: issued.download_url,
                    view_url: issued.view_url,
                    verify_url: issued.verify_url,
                    message,
                });
                self.state.subject = Some(subject);
                self.show(Step::Ready);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn show(&mut self, step: Step) {
        self.state.step = step;
        self.display.show(step);
    }

    fn invalid(&mut self, field: Field, message: String) -> Effect {
        let error = FieldError { field, message };
        self.state.field_error = Some(error.clone());
        Effect::Invalid(error)
    }

    fn present_failure(&mut self, mode: FailurePresentation, failure: &Failure) {
        self.state.controls_enabled = true;
        let message = failure.user_message();
        tracing::warn!(flow = self.config.name, %message, "transition rejected");
        match mode {
            FailurePresentation::ErrorStep => {
                self.state.error_message = Some(message);
                self.show(Step::Error);
            }
            FailurePresentation::FieldError(field) => {
                let step = match field {
                    Field::Document => Step::Form,
                    Field::Birthdate => Step::Birthdate,
                    Field::Text => Step::Text,
                };
                self.state.field_error = Some(FieldError { field, message });
                self.show(step);
            }
        }
    }

    fn continuation_body(&mut self) -> Option<serde_json::Value> {
        match self.config.continuation {
            ContinuationKind::Token => match &self.state.continuation {
                Some(Continuation::Token(token)) if !token.is_empty() => {
                    Some(json!({ "token": token }))
                }
                _ => None,
            },
            ContinuationKind::Number => {
                self.state.subject.as_ref()?;
                let numero = self.state.document.numero.clone();
                if numero.is_empty() {
                    return None;
                }
                let body = json!({ "numero": numero });
                self.state.continuation = Some(Continuation::Number(numero));
                Some(body)
            }
            ContinuationKind::NumberWithText => {
                self.state.subject.as_ref()?;
                let numero = self.state.document.numero.clone();
                let texto = self.state.pending_text.clone()?;
                if numero.is_empty() || texto.is_empty() {
                    return None;
                }
                let body = json!({ "numero": numero, "texto": texto });
                self.state.continuation = Some(Continuation::NumberWithText { numero, texto });
                Some(body)
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
