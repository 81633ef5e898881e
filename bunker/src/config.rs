use std::path::PathBuf;

use crate::{cli::Cli, registry::RoomStore};

/// Settings shared by every command, passed explicitly to each handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub rooms_file: PathBuf,
    pub debug: bool,
}

impl Config {
    pub fn new(rooms_file: impl Into<PathBuf>) -> Self {
        Self {
            rooms_file: rooms_file.into(),
            debug: false,
        }
    }

    pub fn store(&self) -> RoomStore {
        RoomStore::new(&self.rooms_file)
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            rooms_file: cli.rooms_file.clone(),
            debug: cli.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use clap::Parser;

    #[test]
    fn rooms_file_flag_overrides_default() {
        let cli = Cli::try_parse_from(["bunker", "--rooms-file", "/tmp/rooms.csv", "-d", "list"])
            .expect("parse cli");
        let config = Config::from(&cli);

        assert_eq!(config.rooms_file, PathBuf::from("/tmp/rooms.csv"));
        assert!(config.debug);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn join_accepts_room_and_name_options() {
        let cli = Cli::try_parse_from([
            "bunker",
            "join",
            "10.0.0.1:9000",
            "-r",
            "lobby",
            "-n",
            "ada",
        ])
        .expect("parse cli");

        let Command::Join(args) = cli.command else {
            panic!("expected join command");
        };
        assert_eq!(args.target.as_deref(), Some("10.0.0.1:9000"));
        assert_eq!(args.room.as_deref(), Some("lobby"));
        assert_eq!(args.name.as_deref(), Some("ada"));
    }
}
