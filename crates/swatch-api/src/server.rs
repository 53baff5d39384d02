//! API server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use swatch_core::SwatchConfig;
use swatch_session::{SessionLayer, SessionStore, cookie_signer, open_session_store};
use swatch_storage::{ListStore, open_store};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;
use crate::Result;

/// Swatch HTTP server.
pub struct Server {
    addr: SocketAddr,
    state: AppState,
    sessions: SessionLayer,
}

impl Server {
    /// Create a server from already-built parts.
    pub fn new(addr: SocketAddr, store: Arc<dyn ListStore>, sessions: SessionLayer) -> Self {
        Self {
            addr,
            state: AppState::new(store),
            sessions,
        }
    }

    /// Build the store, session store, and cookie signer named by `config`.
    pub async fn from_config(config: &SwatchConfig) -> Result<Self> {
        let addr = config.socket_addr()?;
        let store = open_store(&config.store)?;
        let session_store: Arc<dyn SessionStore> = open_session_store(&config.session).await?;
        let sessions = SessionLayer::new(
            session_store,
            cookie_signer(&config.session),
            &config.session.cookie_name,
        );
        Ok(Self::new(addr, store, sessions))
    }

    /// The address the server binds.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The complete router: routes, session handling, and request tracing.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
            .layer(self.sessions.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until shutdown is signalled.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!(
            addr = %local,
            store = self.state.store.backend_name(),
            "Swatch listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Swatch stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
