//! Server log and console message constants

// =============================================================================
// Startup / Shutdown Messages
// =============================================================================

pub const MSG_BANNER: &str = "Chat Relay Server v";
pub const MSG_LISTENING: &str = "Listening on ";
pub const MSG_CREDENTIALS_LOADED: &str = "Credential table loaded";
pub const MSG_CREDENTIALS_BUILTIN: &str = "Using built-in credential table";
pub const MSG_SHUTDOWN_RECEIVED: &str = "Shutdown signal received, closing all sessions";

// =============================================================================
// Session Messages
// =============================================================================

pub const MSG_SESSION_JOINED: &str = "User joined";
pub const MSG_SESSION_LEFT: &str = "User left";
pub const MSG_AUTH_REJECTED: &str = "Authentication failed";
pub const MSG_STATE_TRANSITION: &str = "Session state";
pub const MSG_CHAT_PUBLISHED: &str = "Published chat line";

// =============================================================================
// Errors
// =============================================================================

pub const ERR_BIND_FAILED: &str = "Failed to bind ";
pub const ERR_ACCEPT: &str = "Failed to accept connection: ";
pub const ERR_CONNECTION: &str = "Connection error";
pub const ERR_CREDENTIAL_READ: &str = "Failed to read credentials";
pub const ERR_WORKER_PANICKED: &str = "Session worker panicked";
pub const ERR_CREDENTIALS: &str = "Failed to load credentials: ";
pub const ERR_SIGNAL_SIGTERM: &str = "Failed to install SIGTERM handler";
pub const ERR_SIGNAL_SIGINT: &str = "Failed to install SIGINT handler";
#[cfg(not(unix))]
pub const ERR_SIGNAL_CTRLC: &str = "Failed to listen for Ctrl+C";
