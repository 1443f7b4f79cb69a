//! Signup and login service for the symptom checker.
//!
//! Credentials live in a single JSON document (`users` and `admins`, plain
//! name/password pairs). Successful logins hand back an opaque token that no
//! endpoint ever checks again.
use actix_web::{error::JsonPayloadError, get, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod user_handlers;

use db::CredentialStore;
use error::AuthError;

pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    /// Serializes the signup read-modify-write within this process.
    pub signup_gate: Mutex<()>,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            signup_gate: Mutex::new(()),
        }
    }
}

const ROUTES: &[(&str, &str)] = &[
    ("GET /health", "liveness"),
    ("POST /api/auth/signup", "create a user account"),
    ("POST /api/auth/user-login", "user login"),
    ("POST /api/auth/admin-login", "admin login"),
];

#[get("/")]
async fn index() -> impl Responder {
    let body: String = ROUTES
        .iter()
        .map(|(route, what)| format!("{route:<28} {what}\n"))
        .collect();
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

/// Simple health check
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "rejecting malformed request body");
    AuthError::MalformedPayload.into()
}

pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state)
            .app_data(
                // Bodies are parsed as JSON whatever the Content-Type says.
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error),
            )
            .service(index)
            .service(health)
            .service(
                web::scope("/api/auth")
                    .service(user_handlers::signup)
                    .service(user_handlers::user_login)
                    .service(user_handlers::admin_login),
            );
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
