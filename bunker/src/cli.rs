use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "bunker - a chat room client", long_about = None)]
pub struct Cli {
    /// Show debug messages.
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// File holding the registered rooms, one `name,address:port` per line.
    #[arg(
        long,
        global = true,
        env = "BUNKER_ROOMS_FILE",
        default_value = "../assets/rooms.csv"
    )]
    pub rooms_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Join a room by registered name or by `address:port`.
    Join(JoinArgs),
    /// Print every registered room.
    List,
    /// Register a room, replacing the endpoint if the name exists.
    Add(AddArgs),
    /// Remove a registered room.
    Del(DelArgs),
}

#[derive(Args, Debug, Clone)]
pub struct JoinArgs {
    /// Room name or `address:port`. Prompted for when omitted.
    pub target: Option<String>,

    /// Register the joined endpoint under this room name.
    #[arg(short, long)]
    pub room: Option<String>,

    /// Your nickname in the room. Prompted for when omitted.
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Name of the room. Prompted for when omitted.
    pub name: Option<String>,

    /// Server endpoint as `address:port`. Prompted for when omitted.
    pub server: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DelArgs {
    /// Name of the room. Prompted for when omitted.
    pub name: Option<String>,
}
