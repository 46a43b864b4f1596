//! HTTP server implementation
//!
//! Wraps the scheduling service in an axum router with optional CORS and
//! request tracing layers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::SchedulingService;

use super::api::create_router;
use super::config::ServerConfig;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Scheduling service
    pub service: Arc<SchedulingService>,

    /// Server start time
    pub start_time: Instant,
}

// ============================================================================
// Talentsync Server
// ============================================================================

/// HTTP front end of the scheduling service
pub struct TalentsyncServer {
    config: ServerConfig,
    state: AppState,
}

impl TalentsyncServer {
    /// Create a new server
    pub fn new(config: ServerConfig, service: Arc<SchedulingService>) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let state = AppState {
            service,
            start_time: Instant::now(),
        };

        Ok(Self { config, state })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        // Add CORS layer if enabled
        if self.config.enable_cors {
            let origins = if self.config.allowed_origins.is_empty() {
                AllowOrigin::from(Any)
            } else {
                AllowOrigin::list(
                    self.config
                        .allowed_origins
                        .iter()
                        .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
                )
            };

            router = router.layer(
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        // Add tracing layer if enabled
        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        tracing::info!(
            address = %addr,
            collection = self.state.service.default_collection(),
            "Scheduling API listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Scheduling API shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            default_collection: self.state.service.default_collection().to_string(),
            slots_per_day: self.state.service.allocator().capacity_per_day(),
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub default_collection: String,
    pub slots_per_day: usize,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "TalentSync Scheduling API\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Collection: {}\n\
             Slots Per Day: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.default_collection,
            self.slots_per_day,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Configuration error
    ConfigError(String),

    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::BindError(msg) => write!(f, "Failed to bind: {}", msg),
            Self::ServeError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

// ============================================================================
// Tests
// ============================================================================
