//! Core server infrastructure: configuration, state, HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, SuggestConfig};
pub use server::Server;
pub use state::ServerState;
