//! Credential lookup for the login gate
//!
//! Session logic only sees the [`CredentialStore`] trait, so the backing table
//! can be swapped without touching the connection handler.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Lookup consulted once per connection to accept or reject a login
pub trait CredentialStore: Send + Sync {
    /// Returns `true` when `username` exists and `secret` matches it exactly
    fn authenticate(&self, username: &str, secret: &str) -> bool;
}

/// Accounts shipped with the server when no credential file is given
const BUILTIN_ACCOUNTS: &[(&str, &str)] = &[
    ("Dina Walid", "1234"),
    ("Youssef Mohamed", "000000"),
    ("Mahmoud Shaban", "000000"),
    ("Ali", "1234"),
    ("Abdelrahman", "1234"),
    ("Omar", "1234"),
];

/// Error returned when a credential file cannot be loaded
#[derive(Debug)]
pub enum CredentialsError {
    /// The file could not be read
    Io(io::Error),
    /// The file is not a JSON object of username/secret strings
    Parse(serde_json::Error),
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::Io(e) => write!(f, "cannot read credential file: {}", e),
            CredentialsError::Parse(e) => write!(f, "invalid credential file: {}", e),
        }
    }
}

impl std::error::Error for CredentialsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CredentialsError::Io(e) => Some(e),
            CredentialsError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for CredentialsError {
    fn from(err: io::Error) -> Self {
        CredentialsError::Io(err)
    }
}

impl From<serde_json::Error> for CredentialsError {
    fn from(err: serde_json::Error) -> Self {
        CredentialsError::Parse(err)
    }
}

/// Fixed username -> secret table, immutable for the process lifetime
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    accounts: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create a table from an existing map
    pub fn new(accounts: HashMap<String, String>) -> Self {
        Self { accounts }
    }

    /// Table with the built-in test accounts
    pub fn builtin() -> Self {
        BUILTIN_ACCOUNTS
            .iter()
            .map(|(username, secret)| (username.to_string(), secret.to_string()))
            .collect()
    }

    /// Load a table from a JSON object such as `{"alice": "1234"}`
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::Io` if the file cannot be read and
    /// `CredentialsError::Parse` if it is not a flat string-to-string object.
    pub fn from_json_file(path: &Path) -> Result<Self, CredentialsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse a table from JSON text
    pub fn from_json_str(contents: &str) -> Result<Self, CredentialsError> {
        let accounts: HashMap<String, String> = serde_json::from_str(contents)?;
        Ok(Self { accounts })
    }

    /// Number of accounts in the table
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the table has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<(String, String)> for StaticCredentials {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}

impl CredentialStore for StaticCredentials {
    fn authenticate(&self, username: &str, secret: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|expected| expected == secret)
    }
}
