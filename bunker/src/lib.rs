//! Command-line client for registering and joining chat rooms.
//!
//! A room is a name mapped to an `address:port` endpoint, kept in a flat
//! rooms file. Each module covers one responsibility:
//!
//! - [`registry`] loads, edits and saves the rooms file.
//! - [`resolver`] maps user input to an endpoint, by room name first and by
//!   literal `address:port` second.
//! - [`transport`] connects to a room and moves single lines over the socket.
//! - [`commands`] implements `join`, `list`, `add` and `del` on top of those.
//! - [`cli`], [`config`] and [`prompt`] handle arguments and terminal input.
//!
//! The rooms file is rewritten in full by every mutating command and is not
//! locked, so concurrent invocations can overwrite each other's changes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod resolver;
pub mod transport;

pub use error::{BunkerError, Result};
