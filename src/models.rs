use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name/password pair; passwords are plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
    pub password: String,
    /// Keys this service doesn't know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Credential {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            extra: Map::new(),
        }
    }

    pub fn matches(&self, name: &str, password: &str) -> bool {
        self.name == name && self.password == password
    }
}

/// `{ "users": [...], "admins": [...] }`. A missing list reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialDocument {
    pub users: Vec<Credential>,
    pub admins: Vec<Credential>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialDocument {
    pub fn has_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u.name == name)
    }

    pub fn find_user(&self, name: &str, password: &str) -> Option<&Credential> {
        self.users.iter().find(|u| u.matches(name, password))
    }

    pub fn find_admin(&self, name: &str, password: &str) -> Option<&Credential> {
        self.admins.iter().find(|a| a.matches(name, password))
    }
}

// Optional so a missing field is a validation error, not a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthRequest {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((name, password))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_serializes_both_lists() {
        let json = serde_json::to_value(CredentialDocument::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "users": [], "admins": [] }));
    }

    #[test]
    fn unknown_keys_survive_a_rewrite() {
        let raw = r#"{"users":[{"name":"alice","password":"secret1","email":"a@x"}],"version":2}"#;
        let doc: CredentialDocument = serde_json::from_str(raw).unwrap();
        assert!(doc.admins.is_empty());
        assert_eq!(doc.users[0].extra["email"], "a@x");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["version"], 2);
        assert_eq!(back["users"][0]["email"], "a@x");
        assert_eq!(back["admins"], serde_json::json!([]));
    }

    #[test]
    fn credentials_rejects_missing_and_empty_fields() {
        let missing: AuthRequest = serde_json::from_str(r#"{"name":"alice"}"#).unwrap();
        assert!(missing.credentials().is_none());

        let empty: AuthRequest =
            serde_json::from_str(r#"{"name":"","password":"secret1"}"#).unwrap();
        assert!(empty.credentials().is_none());

        let null: AuthRequest =
            serde_json::from_str(r#"{"name":"alice","password":null}"#).unwrap();
        assert!(null.credentials().is_none());

        let ok: AuthRequest =
            serde_json::from_str(r#"{"name":"alice","password":"secret1"}"#).unwrap();
        assert_eq!(ok.credentials(), Some(("alice", "secret1")));
    }

    #[test]
    fn lookups_require_exact_match() {
        let doc = CredentialDocument {
            users: vec![Credential::new("alice", "secret1")],
            admins: vec![Credential::new("root", "toor")],
            ..Default::default()
        };
        assert!(doc.has_user("alice"));
        assert!(!doc.has_user("Alice"));
        assert!(doc.find_user("alice", "secret1").is_some());
        assert!(doc.find_user("alice", "secret1 ").is_none());
        assert!(doc.find_admin("alice", "secret1").is_none());
        assert!(doc.find_admin("root", "toor").is_some());
    }
}
