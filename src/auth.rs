//! Login tokens.
//!
//! A token is the base64 of `[admin:]<name>:<issued-at millis>`. It is not
//! signed, not encrypted and carries no expiry; any holder can decode or
//! forge one. Nothing in this service validates a token after issuing it.
use base64::prelude::*;
use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

const ADMIN_MARKER: &str = "admin:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not valid base64")]
    Encoding,
    #[error("token is not valid utf-8")]
    Utf8,
    #[error("token is missing its timestamp")]
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub subject: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(subject: impl Into<String>, role: Role, issued_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            role,
            issued_at,
        }
    }

    pub fn issue(subject: &str, role: Role) -> Self {
        Self::new(subject, role, Utc::now())
    }

    pub fn encode(&self) -> String {
        let marker = match self.role {
            Role::Admin => ADMIN_MARKER,
            Role::User => "",
        };
        let raw = format!(
            "{marker}{}:{}",
            self.subject,
            self.issued_at.timestamp_millis()
        );
        BASE64_STANDARD.encode(raw)
    }

    /// Reads a token back into its parts. This is inspection only; a decoded
    /// token proves nothing about who sent it.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let bytes = BASE64_STANDARD
            .decode(token)
            .map_err(|_| TokenError::Encoding)?;
        let raw = String::from_utf8(bytes).map_err(|_| TokenError::Utf8)?;

        let (body, millis) = raw.rsplit_once(':').ok_or(TokenError::Timestamp)?;
        let millis: i64 = millis.parse().map_err(|_| TokenError::Timestamp)?;
        let issued_at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(TokenError::Timestamp)?;

        let (role, subject) = match body.strip_prefix(ADMIN_MARKER) {
            Some(subject) => (Role::Admin, subject),
            None => (Role::User, body),
        };
        Ok(Self::new(subject, role, issued_at))
    }
}
