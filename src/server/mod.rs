//! Server module - HTTP layer over the agent
//!
//! Exposes the chat endpoints consumed by the web client.

pub mod routes;

pub use routes::serve;
