//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::build_roster_routes;
use crate::core::{PlayerService, SessionStore};
use crate::storage::InMemorySessionStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Cookie used when none is configured
pub const DEFAULT_COOKIE_NAME: &str = "roster_session";

/// Builder for the roster HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_player_service(SqlitePlayerService::new(pool))
///     .build()?;
/// ```
pub struct ServerBuilder {
    player_service: Option<Arc<dyn PlayerService>>,
    session_store: Option<Arc<dyn SessionStore>>,
    cookie_name: String,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            player_service: None,
            session_store: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the player service (required)
    pub fn with_player_service(mut self, service: impl PlayerService + 'static) -> Self {
        self.player_service = Some(Arc::new(service));
        self
    }

    /// Set the session store (defaults to [`InMemorySessionStore`])
    pub fn with_session_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.session_store = Some(Arc::new(store));
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Add routes next to the roster API, e.g. a static front-end
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let players = self.player_service.ok_or_else(|| {
            anyhow::anyhow!("PlayerService is required. Call .with_player_service()")
        })?;
        let sessions = self
            .session_store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));

        if self.cookie_name.is_empty() {
            anyhow::bail!("Session cookie name must not be empty");
        }

        let state = AppState {
            players,
            sessions,
            cookie_name: Arc::from(self.cookie_name),
        };

        let mut app = build_roster_routes(state);
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and stops on SIGTERM or Ctrl+C after in-flight
    /// requests finish.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
