use crate::auth::{AuthToken, Role};
use crate::error::AuthError;
use crate::models::{AuthRequest, Credential, CredentialDocument, LoginResponse, MessageResponse};
use crate::AppState;
use actix_web::{post, web, HttpResponse};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub fn register_user(
    document: &CredentialDocument,
    name: &str,
    password: &str,
) -> Result<CredentialDocument, AuthError> {
    if document.has_user(name) {
        return Err(AuthError::UserExists);
    }
    let mut updated = document.clone();
    updated.users.push(Credential::new(name, password));
    Ok(updated)
}

/// Looks up `name`/`password` in the list for `role` and mints a token.
pub fn authenticate(
    document: &CredentialDocument,
    role: Role,
    name: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<AuthToken, AuthError> {
    let found = match role {
        Role::User => document.find_user(name, password),
        Role::Admin => document.find_admin(name, password),
    };
    found
        .map(|c| AuthToken::new(c.name.as_str(), role, now))
        .ok_or(AuthError::InvalidCredentials(role))
}

#[post("/signup")]
pub async fn signup(
    data: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AuthError> {
    let (name, password) = data.credentials().ok_or(AuthError::MissingFields)?;

    // Read-modify-write of the whole document; one signup at a time.
    let _gate = state.signup_gate.lock().await;
    let document = state.store.load().await;
    let updated = register_user(&document, name, password).inspect_err(|_| {
        info!(name, "signup rejected, name already taken");
    })?;
    state.store.save(&updated).await?;

    info!(name, "new user registered");
    Ok(HttpResponse::Created().json(MessageResponse::new("User created successfully")))
}

#[post("/user-login")]
pub async fn user_login(
    data: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AuthError> {
    login(&data, &state, Role::User, "User login successful").await
}

#[post("/admin-login")]
pub async fn admin_login(
    data: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AuthError> {
    login(&data, &state, Role::Admin, "Admin login successful").await
}

async fn login(
    request: &AuthRequest,
    state: &AppState,
    role: Role,
    message: &str,
) -> Result<HttpResponse, AuthError> {
    let (name, password) = request.credentials().ok_or(AuthError::MissingFields)?;

    let document = state.store.load().await;
    let token = authenticate(&document, role, name, password, Utc::now()).inspect_err(|_| {
        warn!(name, ?role, "login failed");
    })?;

    info!(name, ?role, "login succeeded");
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: message.to_string(),
        token: token.encode(),
    }))
}
