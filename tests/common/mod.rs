#![allow(dead_code)]

use actix_web::{test, web};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use symptom_auth::db::{CredentialStore, InMemoryStore, StoreError, StoreResult};
use symptom_auth::models::{Credential, CredentialDocument};
use symptom_auth::AppState;

pub fn seeded_document() -> CredentialDocument {
    CredentialDocument {
        users: Vec::new(),
        admins: vec![Credential::new("root", "toor")],
        ..Default::default()
    }
}

pub fn state_with(store: Arc<dyn CredentialStore>) -> web::Data<AppState> {
    web::Data::new(AppState::new(store))
}

pub fn memory_state() -> (Arc<InMemoryStore>, web::Data<AppState>) {
    let store = Arc::new(InMemoryStore::new(seeded_document()));
    let state = state_with(store.clone());
    (store, state)
}

pub fn auth_request(path: &str, body: serde_json::Value) -> actix_web::test::TestRequest {
    test::TestRequest::post().uri(path).set_json(body)
}

/// Counts store calls and can be told to fail every save.
#[derive(Default)]
pub struct ProbeStore {
    pub inner: InMemoryStore,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_saves: bool,
}

impl ProbeStore {
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.loads.load(Ordering::SeqCst) + self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for ProbeStore {
    async fn load(&self) -> CredentialDocument {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load().await
    }

    async fn save(&self, document: &CredentialDocument) -> StoreResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(StoreError::Write {
                path: "auth-credentials.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.save(document).await
    }

    fn backend_name(&self) -> &'static str {
        "probe"
    }
}
