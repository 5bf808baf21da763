//! Relay Common Library
//!
//! Wire protocol and stream helpers shared by the chat relay server and its clients.

pub mod io;
pub mod protocol;

/// Default port for relay connections
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum number of bytes taken from the stream in a single read
///
/// The protocol has no framing, so every read of up to this many bytes is
/// treated as one payload (the credential payload or one chat line).
pub const READ_BUFFER_SIZE: usize = 1024;
