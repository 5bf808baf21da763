//! Chat Relay Server

mod args;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use args::Args;
use relay_server::constants::*;
use relay_server::credentials::{CredentialStore, StaticCredentials};
use relay_server::server::{ConnectionAcceptor, bind_listener};
use relay_server::state::RelayState;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.debug);

    tracing::info!("{}{}", MSG_BANNER, env!("CARGO_PKG_VERSION"));

    let credentials = setup_credentials(args.credentials);
    let listener = setup_network(SocketAddr::new(args.bind, args.port));

    let state = RelayState::new(credentials);
    let acceptor = ConnectionAcceptor::new(listener, state);

    acceptor.run(setup_shutdown_signal()).await;
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise `--debug` selects debug level.
fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load the credential table (file if given, built-in otherwise)
fn setup_credentials(path: Option<PathBuf>) -> Arc<dyn CredentialStore> {
    let store = match path {
        Some(path) => match StaticCredentials::from_json_file(&path) {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    accounts = store.len(),
                    "{}",
                    MSG_CREDENTIALS_LOADED
                );
                store
            }
            Err(e) => {
                eprintln!("{}{}", ERR_CREDENTIALS, e);
                std::process::exit(1);
            }
        },
        None => {
            let store = StaticCredentials::builtin();
            tracing::info!(accounts = store.len(), "{}", MSG_CREDENTIALS_BUILTIN);
            store
        }
    };

    Arc::new(store)
}

/// Bind the relay listener, exiting on failure
fn setup_network(addr: SocketAddr) -> TcpListener {
    let listener = match bind_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("{}{}: {}", ERR_BIND_FAILED, addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("{}{}", MSG_LISTENING, addr);

    listener
}

/// Setup graceful shutdown signal handling (Ctrl+C)
async fn setup_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate()).expect(ERR_SIGNAL_SIGTERM);
        let mut sigint = signal(SignalKind::interrupt()).expect(ERR_SIGNAL_SIGINT);

        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect(ERR_SIGNAL_CTRLC);
    }
}
