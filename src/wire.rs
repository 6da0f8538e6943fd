//! Wire types — normalized network results and typed endpoint payloads.
//!
//! DESIGN
//! ======
//! The backend always answers JSON with an embedded `success` flag, so a
//! transport-level `ok` alone proves nothing. Callers get an [`Envelope`]
//! (transport view) and classify it into a tagged outcome per endpoint
//! family, forcing both the failure and success variants to be handled
//! instead of optional-chaining into a loose payload.

use serde::{Deserialize, Serialize};

/// Synthetic message for network-level failures (timeout, DNS, offline).
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión";

// =============================================================================
// ENVELOPE
// =============================================================================

/// Normalized outcome of one backend call. Always produced, never thrown.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Transport-level success (HTTP 2xx). Business success is separate.
    pub ok: bool,
    /// HTTP status code; 0 for connection failures.
    pub status: u16,
    /// Parsed JSON body; empty object when the body was not valid JSON.
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Assemble an envelope from raw response parts. Non-JSON bodies (an
    /// HTML error page from an intermediary, say) degrade to `{}`.
    #[must_use]
    pub fn from_parts(ok: bool, status: u16, body: &str) -> Self {
        let payload = serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({}));
        Self { ok, status, payload }
    }

    /// The envelope produced when the request never reached the backend.
    #[must_use]
    pub fn connection_error() -> Self {
        Self {
            ok: false,
            status: 0,
            payload: serde_json::json!({ "message": CONNECTION_ERROR_MESSAGE }),
        }
    }
}

// =============================================================================
// SUBJECT RECORD
// =============================================================================

/// Verified person as returned by the backend — masked document only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Display name.
    #[serde(default)]
    pub nombre: String,
    /// Document-type label (`CC`, `TI`, `RC`).
    #[serde(default)]
    pub tipo_doc: String,
    /// Masked document number; the raw number never crosses the wire back.
    #[serde(default)]
    pub num_doc_mask: String,
}

impl SubjectRecord {
    /// `"CC ********678"` — the label shown on confirmation and result steps.
    #[must_use]
    pub fn doc_label(&self) -> String {
        format!("{} {}", self.tipo_doc, self.num_doc_mask).trim().to_string()
    }
}

// =============================================================================
// FAILURE
// =============================================================================

/// Business or transport rejection carried back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    /// Present on rate-limiting rejections; the user must wait this long.
    pub retry_after_seconds: Option<u64>,
}

impl Failure {
    /// Render the message, appending the wait time in whole minutes
    /// (rounded up) when the backend rate-limited the request.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.retry_after_seconds {
            Some(secs) if secs > 0 => {
                let mins = secs.div_ceil(60);
                format!("{} Tiempo de espera: {mins} min.", self.message)
            }
            _ => self.message.clone(),
        }
    }
}

// =============================================================================
// VERIFY OUTCOMES
// =============================================================================

/// Classified result of a primary/secondary verification or admin lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Identity found but a birthdate check is required before a token is
    /// issued (self-service primary verification only).
    RequiresBirthdate { subject: SubjectRecord },
    /// Identity verified. The token is present on token-continuation flows;
    /// admin lookups verify without one.
    Verified {
        token: Option<String>,
        /// Advisory token lifetime from the backend; expiry is enforced
        /// server-side on redemption.
        token_expires_in: Option<u64>,
        subject: SubjectRecord,
    },
    Rejected(Failure),
}

#[derive(Debug, Default, Deserialize)]
struct RawVerify {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    retry_after_seconds: Option<u64>,
    #[serde(default)]
    requires_birthdate: bool,
    token: Option<String>,
    token_expires_in: Option<u64>,
    data: Option<SubjectRecord>,
}

/// Classify a verification envelope. `fallback_message` covers backends
/// that reject without a message body.
#[must_use]
pub fn classify_verify(envelope: &Envelope, fallback_message: &str) -> VerifyOutcome {
    let raw: RawVerify = serde_json::from_value(envelope.payload.clone()).unwrap_or_default();

    if !envelope.ok || !raw.success {
        return VerifyOutcome::Rejected(Failure {
            message: raw.message.unwrap_or_else(|| fallback_message.to_string()),
            retry_after_seconds: raw.retry_after_seconds,
        });
    }

    let subject = raw.data.unwrap_or_default();
    if raw.requires_birthdate {
        VerifyOutcome::RequiresBirthdate { subject }
    } else {
        VerifyOutcome::Verified {
            token: raw.token,
            token_expires_in: raw.token_expires_in,
            subject,
        }
    }
}

// =============================================================================
// GENERATE OUTCOMES
// =============================================================================

/// Successfully issued certificate and its access URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    pub codigo: String,
    pub download_url: String,
    pub view_url: String,
    pub verify_url: String,
    /// The backend found and reused a recently generated document.
    pub recently_generated: bool,
    /// Subject echo — present on admin generation; the self-service flow
    /// relies on the record stored at verification time.
    pub subject: Option<SubjectRecord>,
}

/// Classified result of a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated(IssuedCertificate),
    Rejected(Failure),
}

#[derive(Debug, Default, Deserialize)]
struct RawGenerate {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    retry_after_seconds: Option<u64>,
    codigo: Option<String>,
    download_url: Option<String>,
    view_url: Option<String>,
    verify_url: Option<String>,
    #[serde(default)]
    recently_generated: bool,
    data: Option<SubjectRecord>,
}

/// Classify a generation envelope.
#[must_use]
pub fn classify_generate(envelope: &Envelope, fallback_message: &str) -> GenerateOutcome {
    let raw: RawGenerate = serde_json::from_value(envelope.payload.clone()).unwrap_or_default();

    if !envelope.ok || !raw.success {
        return GenerateOutcome::Rejected(Failure {
            message: raw.message.unwrap_or_else(|| fallback_message.to_string()),
            retry_after_seconds: raw.retry_after_seconds,
        });
    }

    // Missing URLs degrade to inert anchors rather than failing the flow.
    GenerateOutcome::Generated(IssuedCertificate {
        codigo: raw.codigo.unwrap_or_default(),
        download_url: raw.download_url.unwrap_or_else(|| "#".to_string()),
        view_url: raw.view_url.unwrap_or_else(|| "#".to_string()),
        verify_url: raw.verify_url.unwrap_or_else(|| "#".to_string()),
        recently_generated: raw.recently_generated,
        subject: raw.data,
    })
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;
