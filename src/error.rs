use crate::auth::Role;
use crate::db::StoreError;
use crate::models::MessageResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Name and password are required")]
    MissingFields,

    #[error("Invalid request body")]
    MalformedPayload,

    #[error("User already exists")]
    UserExists,

    #[error("{}", invalid_credentials_message(.0))]
    InvalidCredentials(Role),

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

fn invalid_credentials_message(role: &Role) -> &'static str {
    match role {
        Role::User => "Invalid name or password",
        Role::Admin => "Invalid admin name or password",
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingFields | AuthError::MalformedPayload => StatusCode::BAD_REQUEST,
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store details stay in the server log.
        if let AuthError::Store(err) = self {
            tracing::error!(error = %err, "credential store error");
        }
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}
