//! Prestige bot keep-alive HTTP responder
//!
//! Answers uptime pings from hosting platforms that idle quiet processes,
//! plus a small JSON health endpoint.

pub mod health_api;
pub mod server;

pub use server::{keep_alive_router, spawn_keep_alive, start_server, KeepAliveState};
