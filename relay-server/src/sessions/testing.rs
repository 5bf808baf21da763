//! Shared test utilities for session tests

use relay_common::protocol::ServerMessage;
use tokio::sync::mpsc;

use super::SessionRegistry;
use super::session::{NewSessionParams, Session, SessionReceiver};

/// Create an unregistered session with a fresh ID and its queue receiver
pub(crate) fn test_session(registry: &SessionRegistry, username: &str) -> (Session, SessionReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = Session::new(NewSessionParams {
        session_id: registry.next_session_id(),
        username: username.to_string(),
        address: "127.0.0.1:12345".parse().unwrap(),
        tx,
    });
    (session, rx)
}

/// Pop the next queued message, which must be a roster with this rendering
pub(crate) fn expect_roster(rx: &mut SessionReceiver, expected: &str) {
    match rx.try_recv() {
        Ok(ServerMessage::Roster(roster)) => assert_eq!(roster.to_string(), expected),
        other => panic!("Expected roster {:?}, got {:?}", expected, other),
    }
}

/// Pop the next queued message, which must be this chat line
pub(crate) fn expect_chat(rx: &mut SessionReceiver, expected: &str) {
    match rx.try_recv() {
        Ok(ServerMessage::Chat { line }) => assert_eq!(line, expected),
        other => panic!("Expected chat line {:?}, got {:?}", expected, other),
    }
}
