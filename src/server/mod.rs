//! Scheduling API server
//!
//! Exposes the scheduling trigger over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │            TalentsyncServer            │
//! │  POST /schedule-interviews/            │
//! │  GET  /api/health                      │
//! │  GET  /api/calendar/{date}             │
//! │  GET  /metrics                         │
//! └────────────────────────────────────────┘
//!                    │
//!                    ▼
//!          ┌───────────────────┐
//!          │ SchedulingService │
//!          └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use talentsync::server::{ServerConfig, TalentsyncServer};
//!
//! let server = TalentsyncServer::new(ServerConfig::default(), service)?;
//! server.start_with_shutdown(shutdown_signal()).await?;
//! ```

pub mod api;
pub mod config;
pub mod server;

pub use api::{create_router, ApiResponse, DetailResponse, ErrorResponse};
pub use config::{ConfigError, ServerConfig};
pub use server::{AppState, ServerError, ServerInfo, TalentsyncServer};
