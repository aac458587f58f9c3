use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use scopegate_auth::oauth::{AuthorizationConfig, AuthorizationService};
use scopegate_auth::storage::SessionStorage;
use scopegate_auth::{ConsentService, ConsentState, SessionAuthState, consent_routes};
use scopegate_db_memory::InMemoryBackend;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{bootstrap::bootstrap_data, config::AppConfig};

/// Interval between sweeps of expired authorization code sessions.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: InMemoryBackend,
    pub consent: ConsentState,
}

/// Creates the stores, seeds bootstrap data and wires the consent service.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let session_lifetime = cfg.auth.session_lifetime()?;
    let backend = InMemoryBackend::new(session_lifetime);

    bootstrap_data(&cfg.bootstrap, &backend).await?;

    let issuer = AuthorizationService::new(
        backend.applications.clone(),
        backend.sessions.clone(),
        AuthorizationConfig::default().with_code_lifetime(cfg.auth.code_lifetime()?),
    );
    let service = ConsentService::new(
        backend.users.clone(),
        backend.applications.clone(),
        Arc::new(issuer),
    )
    .with_policy_enabled(cfg.auth.consent.enabled);

    let session = SessionAuthState::new(
        backend.login_sessions.clone(),
        cfg.auth.session.cookie_name.as_str(),
    );

    Ok(AppState {
        backend,
        consent: ConsentState::new(Arc::new(service), session),
    })
}

pub fn build_app(state: &AppState, cfg: &AppConfig) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(consent_routes().with_state(state.consent.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|req: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http.request",
                                http.method = %req.method(),
                                http.target = %req.uri(),
                            )
                        })
                        .on_response(
                            |res: &axum::http::Response<_>,
                             latency: Duration,
                             _span: &tracing::Span| {
                                tracing::info!(
                                    http.status = %res.status().as_u16(),
                                    elapsed_ms = %latency.as_millis(),
                                    "request handled"
                                );
                            },
                        ),
                )
                .layer(DefaultBodyLimit::max(cfg.server.body_limit_bytes)),
        )
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub struct ScopegateServer {
    addr: SocketAddr,
    app: Router,
    state: AppState,
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub async fn build(self) -> anyhow::Result<ScopegateServer> {
        let state = build_state(&self.config).await?;
        let app = build_app(&state, &self.config);

        Ok(ScopegateServer {
            addr: self.addr,
            app,
            state,
        })
    }
}

impl ScopegateServer {
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let sweeper = tokio::spawn(sweep_expired_sessions(self.state.backend.clone()));

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        let result = axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        sweeper.abort();
        result?;
        Ok(())
    }
}

async fn sweep_expired_sessions(backend: InMemoryBackend) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        if let Err(e) = backend.sessions.cleanup_expired().await {
            tracing::warn!(error = %e, "Failed to sweep expired authorization sessions");
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
