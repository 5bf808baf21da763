//! Protocol definitions for the chat relay
//!
//! All messages are raw text over TCP with no length prefix and no type tag.
//! A write may be split or coalesced by the transport, so receivers must not
//! assume one read equals one logical message.
//!
//! ## Sequence
//!
//! 1. Client sends `"<username>:<secret>"` (terminator optional).
//! 2. Server answers `"Welcome, <username>!\n"` followed by the history block,
//!    or `"Authentication failed"` and closes the connection.
//! 3. Server sends the roster block `"Connected: <n>\n<user1>,...,<userN>"`.
//! 4. Every later payload from a client is relayed to all clients as
//!    `"<username>: <payload>"`.

use std::fmt;

/// Banner line opening the history block
pub const HISTORY_HEADER: &str = "                     --- Chat History ---\n";

/// Banner line closing the history block
pub const HISTORY_FOOTER: &str = "                --- End of Chat History ---\n";

/// Reply sent to a client whose credentials were rejected
pub const AUTH_FAILED: &str = "Authentication failed";

/// Separator between username and secret in the credential payload
const CREDENTIAL_DELIMITER: char = ':';

/// Username/secret pair sent by a client as its first payload
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    /// Parse the initial credential payload
    ///
    /// Splits on the first `:`. A trailing CR/LF terminator is stripped so
    /// line-oriented clients work too. A payload without a delimiter yields an
    /// empty username and secret, which never authenticates.
    pub fn parse(payload: &str) -> Self {
        let payload = payload.trim_end_matches(['\r', '\n']);
        match payload.split_once(CREDENTIAL_DELIMITER) {
            Some((username, secret)) => Self {
                username: username.to_string(),
                secret: secret.to_string(),
            },
            None => Self {
                username: String::new(),
                secret: String::new(),
            },
        }
    }

    /// Render the payload a client sends to log in
    pub fn to_wire(&self) -> String {
        format!("{}{}{}", self.username, CREDENTIAL_DELIMITER, self.secret)
    }
}

// Custom Debug implementation that redacts the secret
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Snapshot of the connected usernames, in registration order
///
/// The same username may appear more than once when a user is connected
/// from several clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub usernames: Vec<String>,
}

impl Roster {
    /// Build a roster from usernames in registration order
    pub fn new(usernames: Vec<String>) -> Self {
        Self { usernames }
    }

    /// Number of connected sessions
    pub fn count(&self) -> usize {
        self.usernames.len()
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connected: {}", self.count())?;
        if !self.usernames.is_empty() {
            write!(f, "\n{}", self.usernames.join(","))?;
        }
        Ok(())
    }
}

/// Server-to-client messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Greeting sent right after a successful login
    Welcome { username: String },
    /// Replay of every chat line accepted so far
    History { entries: Vec<String> },
    /// Connected users snapshot
    Roster(Roster),
    /// One relayed chat line, already prefixed with the sender's username
    Chat { line: String },
    /// Login rejected; the connection is closed afterwards
    AuthenticationFailed,
}

impl ServerMessage {
    /// Render the message as the raw text written to the socket
    pub fn to_wire(&self) -> String {
        match self {
            ServerMessage::Welcome { username } => format!("Welcome, {}!\n", username),
            ServerMessage::History { entries } => {
                let mut block = String::from(HISTORY_HEADER);
                for entry in entries {
                    block.push_str(entry);
                    block.push('\n');
                }
                block.push_str(HISTORY_FOOTER);
                block
            }
            ServerMessage::Roster(roster) => roster.to_string(),
            ServerMessage::Chat { line } => line.clone(),
            ServerMessage::AuthenticationFailed => AUTH_FAILED.to_string(),
        }
    }
}

/// Format a relayed chat line
pub fn chat_line(username: &str, payload: &str) -> String {
    format!("{}: {}", username, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Credential parsing
    // =========================================================================

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::parse("alice:1234");
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.secret, "1234");
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let creds = Credentials::parse("alice:12:34");
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.secret, "12:34");
    }

    #[test]
    fn test_parse_keeps_spaces_in_username() {
        let creds = Credentials::parse("Dina Walid:1234");
        assert_eq!(creds.username, "Dina Walid");
        assert_eq!(creds.secret, "1234");
    }

    #[test]
    fn test_parse_strips_line_terminator() {
        assert_eq!(Credentials::parse("alice:1234\n").secret, "1234");
        assert_eq!(Credentials::parse("alice:1234\r\n").secret, "1234");
    }

    #[test]
    fn test_parse_missing_delimiter_is_empty() {
        let creds = Credentials::parse("alice1234");
        assert!(creds.username.is_empty());
        assert!(creds.secret.is_empty());

        let creds = Credentials::parse("");
        assert!(creds.username.is_empty());
        assert!(creds.secret.is_empty());
    }

    #[test]
    fn test_parse_empty_secret() {
        let creds = Credentials::parse("alice:");
        assert_eq!(creds.username, "alice");
        assert!(creds.secret.is_empty());
    }

    #[test]
    fn test_credentials_to_wire() {
        let creds = Credentials {
            username: "bob".to_string(),
            secret: "0000".to_string(),
        };
        assert_eq!(creds.to_wire(), "bob:0000");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::parse("alice:super_secret_password");
        let debug_output = format!("{:?}", creds);

        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("super_secret_password"));
        assert!(debug_output.contains("REDACTED"));
    }

    // =========================================================================
    // Message rendering
    // =========================================================================

    #[test]
    fn test_welcome_wire() {
        let msg = ServerMessage::Welcome {
            username: "alice".to_string(),
        };
        assert_eq!(msg.to_wire(), "Welcome, alice!\n");
    }

    #[test]
    fn test_empty_history_wire() {
        let msg = ServerMessage::History { entries: vec![] };
        assert_eq!(
            msg.to_wire(),
            format!("{}{}", HISTORY_HEADER, HISTORY_FOOTER)
        );
    }

    #[test]
    fn test_history_wire_one_entry_per_line() {
        let msg = ServerMessage::History {
            entries: vec!["alice: hi".to_string(), "bob: hello".to_string()],
        };
        assert_eq!(
            msg.to_wire(),
            format!(
                "{}alice: hi\nbob: hello\n{}",
                HISTORY_HEADER, HISTORY_FOOTER
            )
        );
    }

    #[test]
    fn test_roster_single_user() {
        let roster = Roster::new(vec!["alice".to_string()]);
        assert_eq!(roster.count(), 1);
        assert_eq!(
            ServerMessage::Roster(roster).to_wire(),
            "Connected: 1\nalice"
        );
    }

    #[test]
    fn test_roster_joins_with_commas() {
        let roster = Roster::new(vec![
            "alice".to_string(),
            "bob".to_string(),
            "alice".to_string(),
        ]);
        assert_eq!(roster.to_string(), "Connected: 3\nalice,bob,alice");
    }

    #[test]
    fn test_roster_empty() {
        let roster = Roster::default();
        assert_eq!(roster.count(), 0);
        assert_eq!(roster.to_string(), "Connected: 0");
    }

    #[test]
    fn test_chat_wire_is_verbatim() {
        let msg = ServerMessage::Chat {
            line: chat_line("alice", "hi"),
        };
        assert_eq!(msg.to_wire(), "alice: hi");
    }

    #[test]
    fn test_chat_line_keeps_payload_untouched() {
        assert_eq!(chat_line("bob", "a: b\n"), "bob: a: b\n");
    }

    #[test]
    fn test_auth_failed_wire() {
        assert_eq!(
            ServerMessage::AuthenticationFailed.to_wire(),
            "Authentication failed"
        );
    }
}
