mod animator;
mod chrome;
mod config;
mod display;
mod flow;
mod gateway;
mod handoff;
mod input;
mod wire;

use std::io::{self, BufRead, Write as _};
use std::sync::Arc;

use async_trait::async_trait;

use animator::StatusSink;
use chrome::{ConfirmProvider, ConfirmRequest, ConfirmTone, confirm_or_native};
use display::ViewBinding;
use flow::config as flows;
use flow::controller::FlowController;
use flow::state::Step;
use handoff::{ChangePasswordHandoff, FormSubmitter, HandoffStep, LoginHandoff};

/// Loading copy printed to the terminal as the animator advances.
struct TerminalSink;

impl StatusSink for TerminalSink {
    fn status(&self, title: Option<&str>, subtitle: &str) {
        if let Some(title) = title {
            println!("\n  {title}");
        }
        for line in subtitle.lines() {
            println!("    {line}");
        }
    }
}

/// Region visibility traced for debugging; the prompt loop below renders
/// the actual steps.
struct TerminalBinding;

impl ViewBinding for TerminalBinding {
    fn set_visible(&self, region: &str, visible: bool) {
        if visible {
            tracing::debug!(%region, "region shown");
        }
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{label}: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn yes(label: &str) -> bool {
    prompt(label).is_some_and(|answer| matches!(answer.as_str(), "s" | "si" | "sí" | "y"))
}

/// Native confirmation prompt on stdin.
struct TerminalConfirm;

#[async_trait]
impl ConfirmProvider for TerminalConfirm {
    async fn confirm(&self, request: &ConfirmRequest) -> bool {
        println!("\n  {}", request.tone.title());
        yes(&format!("{} [s/n]", request.message))
    }
}

async fn confirm(message: &str) -> bool {
    let request = ConfirmRequest::new(message, ConfirmTone::Neutral);
    confirm_or_native(None, &TerminalConfirm, &request).await
}

/// Page-level submit stand-in; the browser original navigates away here.
struct TerminalSubmitter;

#[async_trait]
impl FormSubmitter for TerminalSubmitter {
    async fn submit(&self) {
        println!("  Enviando formulario...");
    }
}

async fn run_login(floor: std::time::Duration) {
    let mut flow = LoginHandoff::new(floor, Arc::new(TerminalSubmitter));
    while flow.step() == HandoffStep::Form {
        if let Some(error) = flow.error() {
            println!("  ! {error}");
        }
        let Some(user) = prompt("Usuario") else { return };
        let Some(pass) = prompt("Contraseña") else { return };
        flow.submit(&user, &pass).await;
    }
}

async fn run_change_password(floor: std::time::Duration) {
    let mut flow = ChangePasswordHandoff::new(floor, Arc::new(TerminalSubmitter));
    while flow.step() == HandoffStep::Form {
        if let Some(error) = flow.error() {
            println!("  ! {error}");
        }
        let Some(p1) = prompt("Nueva contraseña") else { return };
        let Some(p2) = prompt("Confirmar contraseña") else { return };
        flow.submit(&p1, &p2).await;
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = config::AppConfig::from_env().expect("CERTFLOW_BASE_URL required");
    let flow_name = std::env::args().nth(1).unwrap_or_else(|| "self".into());
    let flow_config = match flow_name.as_str() {
        "self" => flows::self_service(settings.min_transition),
        "admin" => flows::admin(settings.min_transition),
        "especial" => flows::admin_special(settings.min_transition),
        "login" => return run_login(settings.min_transition).await,
        "clave" => return run_change_password(settings.min_transition).await,
        other => {
            eprintln!("unknown flow '{other}' (expected: self, admin, especial, login, clave)");
            std::process::exit(2);
        }
    };
    tracing::info!(flow = flow_config.name, base_url = %settings.base_url, "certflow starting");

    let gateway = Arc::new(
        gateway::HttpGateway::new(settings.base_url.clone(), settings.csrf_token.clone())
            .expect("HTTP client build failed"),
    );
    let mut controller =
        FlowController::new(flow_config, gateway, Arc::new(TerminalSink), Arc::new(TerminalBinding));

    loop {
        if let Some(error) = &controller.state().field_error {
            println!("  ! {}", error.message);
        }
        match controller.step() {
            Step::Form => {
                let tipo = if controller.config().requires_doc_type {
                    match prompt("Tipo de documento (CC/TI/RC)") {
                        Some(tipo) => tipo,
                        None => break,
                    }
                } else {
                    String::new()
                };
                let Some(numero) = prompt("Número de documento") else { break };
                let effect = controller.submit_document(&tipo, &numero);
                controller.settle(effect).await;
            }
            Step::Birthdate => {
                let Some(fecha) = prompt("Fecha de nacimiento (AAAA-MM-DD)") else { break };
                let effect = controller.submit_birthdate(&fecha);
                controller.settle(effect).await;
            }
            Step::Text => {
                let Some(texto) = prompt("Texto personalizado") else { break };
                let effect = controller.submit_text(&texto);
                controller.settle(effect).await;
            }
            Step::Confirm => {
                if let Some(subject) = &controller.state().subject {
                    println!("\n  {}", subject.nombre);
                    println!("  {}", subject.doc_label());
                }
                if let Some(texto) = &controller.state().pending_text {
                    println!("  Texto: {texto}");
                }
                match prompt("¿Generar certificado? [s/n/atras]").as_deref() {
                    Some("s" | "si" | "sí" | "y") => {
                        let effect = controller.confirm_generate();
                        controller.settle(effect).await;
                    }
                    Some("atras" | "a") => {
                        let _ = controller.go_back();
                    }
                    Some(_) => controller.reset(),
                    None => break,
                }
            }
            Step::Ready => {
                if let Some(ready) = &controller.state().ready {
                    println!("\n  Certificado {} listo para {}", ready.codigo, ready.nombre);
                    println!("  {}", ready.message);
                    println!("  Descargar:  {}", ready.download_url);
                    println!("  Ver:        {}", ready.view_url);
                    println!("  Verificar:  {}", ready.verify_url);
                }
                if confirm("¿Desea realizar otra consulta?").await {
                    controller.reset();
                } else {
                    break;
                }
            }
            Step::Error => {
                if let Some(message) = &controller.state().error_message {
                    println!("\n  Error: {message}");
                }
                if confirm("¿Desea reintentar?").await {
                    controller.reset();
                } else {
                    break;
                }
            }
            Step::Loading => {
                // settle() resolves transitions in place, so the loop never
                // observes this step; guard against a future driver change.
                tracing::warn!("loop reached the loading step");
                controller.reset();
            }
        }
    }
}
