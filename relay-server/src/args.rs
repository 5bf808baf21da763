//! Command-line argument parsing

use clap::Parser;
use relay_common::DEFAULT_PORT;
use std::net::IpAddr;
use std::path::PathBuf;

/// Chat Relay Server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// IP address to bind to (IPv4 or IPv6)
    #[arg(short, long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// JSON file mapping usernames to secrets (default: built-in table)
    #[arg(short, long)]
    pub credentials: Option<PathBuf>,

    /// Enable debug logging (shows session joins, leaves and state changes)
    #[arg(long, default_value = "false")]
    pub debug: bool,
}
