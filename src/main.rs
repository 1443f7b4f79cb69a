use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use symptom_auth::config::Config;
use symptom_auth::db::{CredentialStore, JsonFileStore};
use symptom_auth::{configure, init_tracing, AppState};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = JsonFileStore::new(&config.credentials_path);
    info!(
        backend = store.backend_name(),
        path = %store.path().display(),
        "credential store ready"
    );
    let state = web::Data::new(AppState::new(Arc::new(store)));

    let addr = config.address();
    info!("Listening on: {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure(state.clone()))
    })
    .bind(addr)?
    .run()
    .await
}
