//! Error types shared by the registry, resolver, transport and commands.
//!
//! Every variant renders as a single line that names the failing operation,
//! which is what the binary prints before exiting.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BunkerError {
    /// The rooms file could not be read or written.
    #[error("failed to {action} rooms file {}: {source}", .path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An `address:port` literal was malformed.
    #[error("failed to parse address and port from '{input}'")]
    Parse { input: String },

    #[error("no room named '{0}'")]
    NotFound(String),

    /// A join target was neither a registered room nor an `address:port` literal.
    #[error("no room was found for '{0}'")]
    Unresolved(String),

    #[error("room name cannot be empty")]
    EmptyName,

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send line: {0}")]
    Send(#[source] io::Error),

    #[error("failed to receive line: {0}")]
    Recv(#[source] io::Error),

    #[error("connection is closed")]
    NotConnected,

    #[error("failed to read {label} from terminal: {source}")]
    Prompt {
        label: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BunkerError>;
