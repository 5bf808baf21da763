//! Chat Relay Server Library
//!
//! Session registry, history and broadcast engine behind the `relayd` binary,
//! exposed for integration testing.

pub mod connection;
pub mod constants;
pub mod credentials;
pub mod history;
pub mod server;
pub mod sessions;
pub mod state;
