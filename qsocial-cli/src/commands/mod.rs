//! Command implementations for the qsocial CLI

pub mod feed;
pub mod gateway;
pub mod post;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use feed::run_feed;
pub use gateway::run_gateway;
pub use post::run_post;
pub use serve::run_serve;
