//! I/O utilities for sending and receiving protocol messages
//!
//! This module is the interface between the protocol types and the raw byte
//! stream. There is no framing: a payload is whatever one read returns.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::READ_BUFFER_SIZE;
use crate::protocol::{Credentials, ServerMessage};

// =============================================================================
// Message Sending
// =============================================================================

/// Send a `ServerMessage` to a client
pub async fn send_server_message<W>(writer: &mut W, message: &ServerMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message.to_wire().as_bytes()).await?;
    writer.flush().await
}

/// Send the initial credential payload to the server
pub async fn send_credentials<W>(writer: &mut W, credentials: &Credentials) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(credentials.to_wire().as_bytes()).await?;
    writer.flush().await
}

/// Send one chat payload to the server
pub async fn send_chat<W>(writer: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await
}

// =============================================================================
// Message Receiving
// =============================================================================

/// Read one payload from the stream
///
/// Returns `Ok(None)` when the peer closed the connection (zero-length read).
/// Invalid UTF-8 is replaced rather than rejected.
pub async fn read_payload<R>(reader: &mut R, buffer: &mut [u8]) -> io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let n = reader.read(buffer).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buffer[..n]).into_owned()))
}

/// Allocate a read buffer sized for one protocol payload
pub fn payload_buffer() -> Vec<u8> {
    vec![0u8; READ_BUFFER_SIZE]
}
