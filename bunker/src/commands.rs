//! Handlers for the `join`, `list`, `add` and `del` commands.
//!
//! Each handler performs one full load, mutate, save cycle on the rooms file;
//! nothing is cached between invocations.

use tracing::{info, warn};

use crate::{
    cli::{AddArgs, Command, DelArgs, JoinArgs},
    config::Config,
    error::{BunkerError, Result},
    prompt::prompt_line,
    registry::{Room, RoomStore},
    resolver::{Endpoint, Resolution, resolve_from_store},
    transport::Connection,
};

/// Nickname used when none is given and none can be read from the terminal.
pub const DEFAULT_NICKNAME: &str = "anonymous";

pub async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Join(args) => join(args, config).await,
        Command::List => list(config).await,
        Command::Add(args) => add(args, config).await,
        Command::Del(args) => del(args, config).await,
    }
}

async fn join(args: JoinArgs, config: &Config) -> Result<()> {
    let target = argument_or_prompt(args.target, "Room: ").await?;
    let store = config.store();

    let (endpoint, mut room) = match resolve_from_store(&store, &target).await {
        Resolution::LookedUp(endpoint) => (endpoint, Some(target)),
        Resolution::Parsed(endpoint) => (endpoint, None),
        Resolution::Failed => return Err(BunkerError::Unresolved(target)),
    };

    if let Some(name) = args.room {
        let renamed = Room::new(name.clone(), endpoint.address.clone(), endpoint.port);
        register_room(&store, renamed).await?;
        room = Some(name);
    }

    enter_room(&endpoint, room.as_deref(), args.name).await
}

async fn enter_room(
    endpoint: &Endpoint,
    room: Option<&str>,
    nickname: Option<String>,
) -> Result<()> {
    let mut connection = Connection::connect(endpoint).await?;
    println!("Joining: ({})", connection.endpoint());

    // The socket is not needed while waiting on the terminal.
    connection.close().await;

    if let Some(room) = room {
        println!("Room: ({room})");
    }

    let nickname = match nickname {
        Some(nickname) => nickname,
        None => read_nickname().await,
    };
    println!("Name: {nickname}");
    Ok(())
}

async fn read_nickname() -> String {
    match prompt_line("Name: ").await {
        Ok(Some(nickname)) if !nickname.trim().is_empty() => nickname,
        Ok(_) => {
            warn!("no nickname entered, using {DEFAULT_NICKNAME}");
            DEFAULT_NICKNAME.to_string()
        }
        Err(error) => {
            warn!(%error, "failed to input nickname, using {DEFAULT_NICKNAME}");
            DEFAULT_NICKNAME.to_string()
        }
    }
}

async fn list(config: &Config) -> Result<()> {
    let registry = config.store().load().await?;
    for room in registry.rooms() {
        println!("{room}");
    }
    Ok(())
}

async fn add(args: AddArgs, config: &Config) -> Result<()> {
    let name = argument_or_prompt(args.name, "Name: ").await?;
    let server = argument_or_prompt(args.server, "Server: ").await?;

    let endpoint = Endpoint::parse(&server)?;
    register_room(&config.store(), Room::new(name, endpoint.address, endpoint.port)).await
}

async fn del(args: DelArgs, config: &Config) -> Result<()> {
    let name = argument_or_prompt(args.name, "Name: ").await?;
    let store = config.store();

    let mut registry = store.load().await?;
    registry.delete(&name)?;
    store.save(&registry).await?;

    println!("bunker: Deleted room: {name}");
    Ok(())
}

/// Adds `room` to the registry or moves an existing room of that name to
/// the new endpoint.
async fn register_room(store: &RoomStore, room: Room) -> Result<()> {
    if room.name.is_empty() {
        return Err(BunkerError::EmptyName);
    }

    let mut registry = store.load().await?;
    info!(room = %room, "registering room");
    registry.upsert(room);
    store.save(&registry).await
}

/// Uses the command-line value when present, otherwise asks on the terminal.
/// End of input counts as an empty answer.
async fn argument_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(prompt_line(label).await?.unwrap_or_default()),
    }
}
