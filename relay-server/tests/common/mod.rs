//! Shared harness for relay integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use relay_common::io::send_chat;
use relay_server::credentials::StaticCredentials;
use relay_server::server::{ConnectionAcceptor, bind_listener};
use relay_server::state::RelayState;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Upper bound for any single wait in these tests
pub const TIMEOUT: Duration = Duration::from_secs(5);

/// A running relay on an ephemeral loopback port
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: RelayState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay that knows alice/1234, bob/0000 and carol/secret
    pub async fn start() -> Self {
        let credentials: StaticCredentials =
            [("alice", "1234"), ("bob", "0000"), ("carol", "secret")]
                .into_iter()
                .map(|(u, s)| (u.to_string(), s.to_string()))
                .collect();
        let state = RelayState::new(Arc::new(credentials));

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).expect("bind loopback");
        let acceptor = ConnectionAcceptor::new(listener, state.clone());
        let addr = acceptor.local_addr().unwrap();
        let handle = tokio::spawn(acceptor.run(std::future::pending()));

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Wait until exactly `expected` sessions are registered
    pub async fn wait_for_sessions(&self, expected: usize) {
        tokio::time::timeout(TIMEOUT, async {
            while self.state.registry.len().await != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("registry never reached {} sessions", expected));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Raw-text client that buffers whatever the server has sent
pub struct TestClient {
    stream: TcpStream,
    pending: String,
}

impl TestClient {
    /// Open a connection and send `login` verbatim as the credential payload
    pub async fn connect(addr: SocketAddr, login: &str) -> Self {
        let mut stream = TcpStream::connect(addr).await.expect("connect to relay");
        stream
            .write_all(login.as_bytes())
            .await
            .expect("send credentials");
        Self {
            stream,
            pending: String::new(),
        }
    }

    /// Connect and wait for the roster that confirms registration
    pub async fn login(addr: SocketAddr, login: &str, roster: &str) -> Self {
        let mut client = Self::connect(addr, login).await;
        client.expect(roster).await;
        client
    }

    /// Send one chat payload
    pub async fn say(&mut self, text: &str) {
        send_chat(&mut self.stream, text).await.expect("send chat");
    }

    /// Shut down the sending side; the server sees a disconnect but can still write
    pub async fn close_write(&mut self) {
        self.stream.shutdown().await.expect("shut down write half");
    }

    /// Read until `needle` arrives; returns everything up to and including it
    pub async fn expect(&mut self, needle: &str) -> String {
        let mut buffer = [0u8; 1024];
        let stream = &mut self.stream;
        let pending = &mut self.pending;

        tokio::time::timeout(TIMEOUT, async {
            while !pending.contains(needle) {
                let n = stream.read(&mut buffer).await.expect("read from relay");
                assert!(
                    n > 0,
                    "connection closed before {:?} arrived (got {:?})",
                    needle,
                    pending
                );
                pending.push_str(&String::from_utf8_lossy(&buffer[..n]));
            }
        })
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {:?} (got {:?})", needle, self.pending));

        let end = self.pending.find(needle).unwrap() + needle.len();
        self.pending.drain(..end).collect()
    }

    /// Read until the server closes the connection; returns everything read
    pub async fn read_to_close(mut self) -> String {
        let mut rest = String::new();
        tokio::time::timeout(TIMEOUT, self.stream.read_to_string(&mut rest))
            .await
            .expect("timed out waiting for close")
            .expect("read until close");
        self.pending.push_str(&rest);
        self.pending
    }

    /// Whatever has been received but not yet consumed by `expect`
    pub fn unread(&self) -> &str {
        &self.pending
    }
}
