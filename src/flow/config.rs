//! Flow configuration — the declarative shape of one wizard instance.
//!
//! The three built-in configurations reproduce the portal's three wizard
//! cards: the citizen self-service flow, the administrator flow, and the
//! administrator "special text" flow. Copy is the portal's own Spanish
//! text; timings carry over the original per-flow animation schedule.

use std::time::Duration;

use crate::animator::StatusUpdate;

use super::state::{Field, Step};

/// Loading copy plus the animation schedule for one transition.
#[derive(Debug, Clone)]
pub struct StatusSpec {
    pub title: String,
    pub subtitle: String,
    /// Flavor swaps applied while the join is in progress.
    pub updates: Vec<StatusUpdate>,
    /// Animator duration for this transition; at least the flow floor.
    pub total: Duration,
}

impl StatusSpec {
    fn plain(title: &str, subtitle: &str, total: Duration) -> Self {
        Self { title: title.into(), subtitle: subtitle.into(), updates: Vec::new(), total }
    }
}

/// Where a transition's rejection is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePresentation {
    /// Dedicated error step with a retry action.
    ErrorStep,
    /// In-place message on the given field's step.
    FieldError(Field),
}

#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub path: String,
    pub loading: StatusSpec,
    /// Message used when the backend rejects without one.
    pub fallback_message: String,
    pub failure: FailurePresentation,
}

/// How the generation request is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
    Token,
    Number,
    NumberWithText,
}

/// Validation and result copy for one flow.
#[derive(Debug, Clone)]
pub struct FlowCopy {
    pub missing_document: String,
    pub invalid_length: String,
    pub missing_birthdate: String,
    pub invalid_birthdate: String,
    pub missing_text: String,
    pub ready_default: String,
    pub ready_recent: String,
}

// =============================================================================
// FLOW CONFIG
// =============================================================================

#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub name: &'static str,
    pub floor: Duration,
    /// The self-service form also asks for the document type.
    pub requires_doc_type: bool,
    /// Admin endpoints reject out-of-window numbers; check before calling.
    pub enforce_number_length: bool,
    pub verify: EndpointSpec,
    /// Secondary birthdate verification (self-service only).
    pub secondary: Option<EndpointSpec>,
    /// Free-text step between verification and confirmation (special only).
    pub has_text_step: bool,
    pub generate: EndpointSpec,
    pub continuation: ContinuationKind,
    /// Step → view-region name, defining which steps exist for this flow.
    pub regions: Vec<(Step, String)>,
    pub copy: FlowCopy,
}

const FIRMA_SUBTITLE: &str =
    "Aplicando firma del Capitán Menor.\nRegistrando documento en el sistema de verificación.";

const READY_DEFAULT: &str = "Puede descargar el archivo o visualizarlo en línea.";

fn regions(pairs: &[(Step, &str)]) -> Vec<(Step, String)> {
    pairs.iter().map(|(step, id)| (*step, (*id).to_string())).collect()
}

/// Citizen self-service flow: verify (optionally with birthdate), confirm,
/// generate with a continuation token.
#[must_use]
pub fn self_service(floor: Duration) -> FlowConfig {
    FlowConfig {
        name: "self-service",
        floor,
        requires_doc_type: true,
        enforce_number_length: false,
        verify: EndpointSpec {
            path: "/api/verificar".into(),
            loading: StatusSpec::plain(
                "Verificando identidad...",
                "Consultando base de datos oficial del Cabildo",
                floor,
            ),
            fallback_message: "No fue posible verificar la información.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        secondary: Some(EndpointSpec {
            path: "/api/verificar/fecha-nacimiento".into(),
            loading: StatusSpec::plain(
                "Verificando identidad...",
                "Validando fecha de nacimiento",
                floor,
            ),
            fallback_message: "No fue posible validar.".into(),
            failure: FailurePresentation::FieldError(Field::Birthdate),
        }),
        has_text_step: false,
        generate: EndpointSpec {
            path: "/api/certificados/generar".into(),
            loading: StatusSpec {
                title: "Generando certificado...".into(),
                subtitle: "Preparando documento".into(),
                updates: vec![StatusUpdate {
                    at: floor,
                    title: None,
                    subtitle: FIRMA_SUBTITLE.into(),
                }],
                total: floor + Duration::from_millis(2000),
            },
            fallback_message: "No fue posible generar el documento.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        continuation: ContinuationKind::Token,
        regions: regions(&[
            (Step::Form, "stepForm"),
            (Step::Birthdate, "stepBirthdate"),
            (Step::Confirm, "stepConfirm"),
            (Step::Loading, "stepLoading"),
            (Step::Ready, "stepReady"),
            (Step::Error, "stepError"),
        ]),
        copy: FlowCopy {
            missing_document: "Debe seleccionar el tipo e ingresar el número de documento.".into(),
            invalid_length: "Longitud del número de documento no válida.".into(),
            missing_birthdate: "Debe seleccionar una fecha.".into(),
            invalid_birthdate: "Debe seleccionar una fecha válida.".into(),
            missing_text: "Debe escribir el texto personalizado.".into(),
            ready_default: READY_DEFAULT.into(),
            ready_recent: "Encontramos un certificado generado recientemente.".into(),
        },
    }
}

/// Administrator flow: validate by number, confirm, generate by number.
#[must_use]
pub fn admin(floor: Duration) -> FlowConfig {
    FlowConfig {
        name: "admin",
        floor,
        requires_doc_type: false,
        enforce_number_length: true,
        verify: EndpointSpec {
            path: "/api/admin/certificados/validar".into(),
            loading: StatusSpec::plain("Validando en el censo...", "Comprobando afiliación", floor),
            fallback_message: "No fue posible validar el documento.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        secondary: None,
        has_text_step: false,
        generate: EndpointSpec {
            path: "/api/admin/certificados/generar".into(),
            loading: StatusSpec {
                title: "Procesando...".into(),
                subtitle: "Enviando solicitud".into(),
                updates: vec![
                    StatusUpdate {
                        at: floor,
                        title: Some("Generando certificado...".into()),
                        subtitle: "Preparando documento".into(),
                    },
                    StatusUpdate {
                        at: floor + Duration::from_millis(1200),
                        title: None,
                        subtitle: FIRMA_SUBTITLE.into(),
                    },
                ],
                total: floor + Duration::from_millis(2400),
            },
            fallback_message: "No fue posible generar el documento.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        continuation: ContinuationKind::Number,
        regions: regions(&[
            (Step::Form, "adminCertStepForm"),
            (Step::Confirm, "adminCertStepConfirm"),
            (Step::Loading, "adminCertStepLoading"),
            (Step::Ready, "adminCertStepReady"),
            (Step::Error, "adminCertStepError"),
        ]),
        copy: FlowCopy {
            missing_document: "Debe ingresar el número de documento.".into(),
            invalid_length: "Longitud del número de documento no válida.".into(),
            missing_birthdate: "Debe seleccionar una fecha.".into(),
            invalid_birthdate: "Debe seleccionar una fecha válida.".into(),
            missing_text: "Debe escribir el texto personalizado.".into(),
            ready_default: READY_DEFAULT.into(),
            ready_recent: "Encontramos un certificado generado recientemente (Admin).".into(),
        },
    }
}

/// Administrator "special text" flow: validate, author free text, confirm,
/// generate with number plus text.
#[must_use]
pub fn admin_special(floor: Duration) -> FlowConfig {
    FlowConfig {
        name: "admin-special",
        floor,
        requires_doc_type: false,
        enforce_number_length: true,
        verify: EndpointSpec {
            path: "/api/admin/certificados/especial/validar".into(),
            loading: StatusSpec::plain("Validando en el censo...", "Comprobando afiliación", floor),
            fallback_message: "No fue posible validar el documento.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        secondary: None,
        has_text_step: true,
        generate: EndpointSpec {
            path: "/api/admin/certificados/especial/generar".into(),
            loading: StatusSpec {
                title: "Procesando...".into(),
                subtitle: "Enviando solicitud".into(),
                updates: vec![
                    StatusUpdate {
                        at: floor,
                        title: Some("Generando certificado especial...".into()),
                        subtitle: "Preparando documento".into(),
                    },
                    StatusUpdate {
                        at: floor + Duration::from_millis(1200),
                        title: None,
                        subtitle: FIRMA_SUBTITLE.into(),
                    },
                ],
                total: floor + Duration::from_millis(3600),
            },
            fallback_message: "No fue posible generar el documento.".into(),
            failure: FailurePresentation::ErrorStep,
        },
        continuation: ContinuationKind::NumberWithText,
        regions: regions(&[
            (Step::Form, "adminSpecialStepDoc"),
            (Step::Text, "adminSpecialStepText"),
            (Step::Confirm, "adminSpecialStepConfirm"),
            (Step::Loading, "adminSpecialStepLoading"),
            (Step::Ready, "adminSpecialStepReady"),
            (Step::Error, "adminSpecialStepError"),
        ]),
        copy: FlowCopy {
            missing_document: "Debe ingresar el número de documento.".into(),
            invalid_length: "Longitud del número de documento no válida.".into(),
            missing_birthdate: "Debe seleccionar una fecha.".into(),
            invalid_birthdate: "Debe seleccionar una fecha válida.".into(),
            missing_text: "Debe escribir el texto personalizado.".into(),
            ready_default: READY_DEFAULT.into(),
            ready_recent: "Encontramos un certificado generado recientemente.".into(),
        },
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
