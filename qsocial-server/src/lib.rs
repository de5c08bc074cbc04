//! qsocial-server: the message API
//!
//! [`MessageService`] implements Create and List against an injected
//! [`MessageStore`]. Two thin adapters expose it:
//! - [`http`]: axum server for the local process
//! - [`gateway`]: proxy-event handler for function hosting

pub mod gateway;
pub mod http;
pub mod service;
pub mod store;

pub use gateway::{Gateway, GatewayRequest, GatewayResponse};
pub use http::{build_router, run_server, ServerConfig};
pub use service::{Clock, Health, MessageService, ServiceError, SystemClock};
pub use store::{open_store, MemoryStore, MessageStore, PgStore, SqliteStore, StoreError};
