//! Turns user input into a connectable endpoint.
//!
//! Input is first looked up as a registered room name and only then parsed as
//! a literal `address:port`, so a room literally named `10.0.0.1:9` shadows
//! the endpoint of the same spelling.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    error::{BunkerError, Result},
    registry::{Registry, RoomStore},
};

/// An address and port pair. The address is kept verbatim; it is only
/// validated when a connection is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Splits `input` once on the first `:` and parses the remainder as a
    /// decimal port.
    pub fn parse(input: &str) -> Result<Self> {
        let parse_error = || BunkerError::Parse {
            input: input.to_string(),
        };
        let (address, port) = input.split_once(':').ok_or_else(parse_error)?;
        let port = port.parse::<u16>().map_err(|_| parse_error())?;
        Ok(Self::new(address, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Outcome of resolving a join target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The input named a registered room.
    LookedUp(Endpoint),
    /// The input was a literal `address:port`.
    Parsed(Endpoint),
    Failed,
}

impl Resolution {
    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            Resolution::LookedUp(endpoint) | Resolution::Parsed(endpoint) => Some(endpoint),
            Resolution::Failed => None,
        }
    }
}

/// Resolves `input` against an already loaded registry.
pub fn resolve(registry: &Registry, input: &str) -> Resolution {
    if let Some(room) = registry.find(input) {
        return Resolution::LookedUp(room.endpoint());
    }

    match Endpoint::parse(input) {
        Ok(endpoint) => Resolution::Parsed(endpoint),
        Err(_) => Resolution::Failed,
    }
}

/// Loads the registry and resolves `input` against it.
///
/// An unreadable rooms file only disables the name lookup; literal endpoints
/// still resolve.
pub async fn resolve_from_store(store: &RoomStore, input: &str) -> Resolution {
    let registry = match store.load().await {
        Ok(registry) => registry,
        Err(error) => {
            warn!(%error, "room lookup unavailable");
            Registry::new()
        }
    };

    let resolution = resolve(&registry, input);
    debug!(input, ?resolution, "resolved join target");
    resolution
}
