use super::*;
use serde_json::json;

fn ok_envelope(payload: serde_json::Value) -> Envelope {
    Envelope { ok: true, status: 200, payload }
}

// =========================================================================
// Envelope
// =========================================================================

#[test]
fn from_parts_parses_json_body() {
    let env = Envelope::from_parts(true, 200, r#"{"success": true}"#);
    assert!(env.ok);
    assert_eq!(env.status, 200);
    assert_eq!(env.payload["success"], json!(true));
}

#[test]
fn from_parts_degrades_non_json_to_empty_object() {
    let env = Envelope::from_parts(false, 502, "<html>Bad Gateway</html>");
    assert!(!env.ok);
    assert_eq!(env.payload, json!({}));
}

#[test]
fn connection_error_shape() {
    let env = Envelope::connection_error();
    assert!(!env.ok);
    assert_eq!(env.status, 0);
    assert_eq!(env.payload["message"], json!(CONNECTION_ERROR_MESSAGE));
}

// =========================================================================
// classify_verify
// =========================================================================

#[test]
fn verify_direct_token() {
    let env = ok_envelope(json!({
        "success": true,
        "token": "tok-123",
        "token_expires_in": 300,
        "data": { "nombre": "Juan Pérez García", "tipo_doc": "CC", "num_doc_mask": "********678" }
    }));
    let outcome = classify_verify(&env, "fallback");
    match outcome {
        VerifyOutcome::Verified { token, token_expires_in, subject } => {
            assert_eq!(token.as_deref(), Some("tok-123"));
            assert_eq!(token_expires_in, Some(300));
            assert_eq!(subject.nombre, "Juan Pérez García");
            assert_eq!(subject.doc_label(), "CC ********678");
        }
        other => panic!("expected Verified, got {other:?}"),
    }
}

#[test]
fn verify_requires_birthdate() {
    let env = ok_envelope(json!({
        "success": true,
        "requires_birthdate": true,
        "data": { "nombre": "Juan", "tipo_doc": "CC", "num_doc_mask": "********678" }
    }));
    assert!(matches!(
        classify_verify(&env, "fallback"),
        VerifyOutcome::RequiresBirthdate { .. }
    ));
}

#[test]
fn verify_business_rejection_uses_backend_message() {
    let env = Envelope {
        ok: false,
        status: 404,
        payload: json!({ "success": false, "message": "Ciudadano no encontrado en el censo." }),
    };
    match classify_verify(&env, "fallback") {
        VerifyOutcome::Rejected(failure) => {
            assert_eq!(failure.message, "Ciudadano no encontrado en el censo.");
            assert_eq!(failure.retry_after_seconds, None);
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn verify_transport_ok_but_success_false_is_rejected() {
    // Transport success must not be trusted as business success.
    let env = ok_envelope(json!({ "success": false }));
    match classify_verify(&env, "No fue posible verificar la información.") {
        VerifyOutcome::Rejected(failure) => {
            assert_eq!(failure.message, "No fue posible verificar la información.");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn verify_rate_limited_carries_retry_after() {
    let env = Envelope {
        ok: false,
        status: 429,
        payload: json!({
            "success": false,
            "locked": true,
            "message": "Por seguridad, debe esperar antes de intentar nuevamente.",
            "retry_after_seconds": 125
        }),
    };
    match classify_verify(&env, "fallback") {
        VerifyOutcome::Rejected(failure) => {
            assert_eq!(failure.retry_after_seconds, Some(125));
            let rendered = failure.user_message();
            assert!(rendered.contains("3 min"), "rendered: {rendered}");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn verify_malformed_payload_rejects_with_fallback() {
    let env = ok_envelope(json!([1, 2, 3]));
    match classify_verify(&env, "fallback") {
        VerifyOutcome::Rejected(failure) => assert_eq!(failure.message, "fallback"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// =========================================================================
// classify_generate
// =========================================================================

#[test]
fn generate_success_with_urls() {
    let env = ok_envelope(json!({
        "success": true,
        "codigo": "CERT-0001",
        "recently_generated": false,
        "download_url": "/certificados/descargar/CERT-0001",
        "view_url": "/certificados/ver/CERT-0001",
        "verify_url": "/verificar-certificados?codigo=CERT-0001"
    }));
    match classify_generate(&env, "fallback") {
        GenerateOutcome::Generated(issued) => {
            assert_eq!(issued.codigo, "CERT-0001");
            assert!(!issued.recently_generated);
            assert_eq!(issued.download_url, "/certificados/descargar/CERT-0001");
            assert!(issued.subject.is_none());
        }
        other => panic!("expected Generated, got {other:?}"),
    }
}

#[test]
fn generate_success_with_subject_echo() {
    let env = ok_envelope(json!({
        "success": true,
        "codigo": "CERT-0002",
        "recently_generated": true,
        "data": { "nombre": "Juan", "tipo_doc": "CC", "num_doc_mask": "********678" }
    }));
    match classify_generate(&env, "fallback") {
        GenerateOutcome::Generated(issued) => {
            assert!(issued.recently_generated);
            assert_eq!(issued.subject.unwrap().nombre, "Juan");
            // Absent URLs degrade to inert anchors.
            assert_eq!(issued.download_url, "#");
        }
        other => panic!("expected Generated, got {other:?}"),
    }
}

#[test]
fn generate_failure_uses_fallback_when_no_message() {
    let env = Envelope { ok: false, status: 500, payload: json!({}) };
    match classify_generate(&env, "No fue posible generar el documento.") {
        GenerateOutcome::Rejected(failure) => {
            assert_eq!(failure.message, "No fue posible generar el documento.");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// =========================================================================
// Failure::user_message
// =========================================================================

#[test]
fn wait_time_rounds_up_to_whole_minutes() {
    let failure = Failure {
        message: "Debe esperar.".into(),
        retry_after_seconds: Some(125),
    };
    assert_eq!(failure.user_message(), "Debe esperar. Tiempo de espera: 3 min.");

    let exact = Failure { message: "Debe esperar.".into(), retry_after_seconds: Some(120) };
    assert_eq!(exact.user_message(), "Debe esperar. Tiempo de espera: 2 min.");
}

#[test]
fn no_wait_time_leaves_message_untouched() {
    let failure = Failure { message: "No encontrado.".into(), retry_after_seconds: None };
    assert_eq!(failure.user_message(), "No encontrado.");

    let zero = Failure { message: "No encontrado.".into(), retry_after_seconds: Some(0) };
    assert_eq!(zero.user_message(), "No encontrado.");
}
