use std::sync::Arc;

use anyhow::Context as _;
use api::auth::AuthService;
use api::finance::FinanceService;
use api::goals::GoalService;
use api::journal::JournalService;
use api::vault::VaultService;
use axum::routing::{get, patch, post};
use axum::Router;
use store::{DocumentStore, MemoryStore, PostgresStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::settings::Settings;

/// Shared handler state: one service per resource, all borrowing the same
/// document store.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub journal: JournalService,
    pub goals: GoalService,
    pub finance: FinanceService,
    pub vault: VaultService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, settings: &Settings) -> Self {
        Self {
            auth: AuthService::new(store.clone(), settings.auth.secret.as_str(), settings.auth.ttl),
            journal: JournalService::new(store.clone()),
            goals: GoalService::new(store.clone()),
            finance: FinanceService::new(store.clone()),
            vault: VaultService::new(store),
        }
    }
}

/// Build the router. One REST sub-path per resource; register and login are
/// the only routes that skip the bearer-token check.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/journal",
            get(routes::journal::list).post(routes::journal::create),
        )
        .route(
            "/api/goals",
            get(routes::goals::list).post(routes::goals::create),
        )
        .route(
            "/api/goals/:id",
            patch(routes::goals::update).delete(routes::goals::remove),
        )
        .route(
            "/api/finance",
            get(routes::finance::list).post(routes::finance::create),
        )
        .route(
            "/api/vault",
            get(routes::vault::list).post(routes::vault::create),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match settings.storage.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "postgres" => {
            let store = PostgresStore::connect(&settings.database.url())
                .await
                .context("failed to open the documents database")?;
            Ok(Arc::new(store))
        }
        other => anyhow::bail!("unknown storage backend: {other}"),
    }
}

/// Open the configured store, then serve until the process is stopped.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let store = build_store(&settings).await?;
    let state = AppState::new(store, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, backend = %settings.storage.backend, "server listening");

    axum::serve(listener, app(state).into_make_service())
        .await
        .context("server stopped unexpectedly")
}
