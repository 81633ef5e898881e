//! Persistent room registry backed by a flat text file.
//!
//! Each line of the rooms file holds one room as `name,address:port`. The
//! whole file is read at the start of every command and rewritten in full at
//! the end; there is no file locking, so two processes mutating the registry
//! at the same time can lose one of the updates.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    error::{BunkerError, Result},
    resolver::Endpoint,
};

/// A named alias for a network endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub address: String,
    pub port: u16,
}

impl Room {
    pub fn new(name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.address.clone(), self.port)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}:{}", self.name, self.address, self.port)
    }
}

/// Ordered collection of rooms with unique names.
///
/// Order is insertion order. Replacing a room keeps its position and deleting
/// one shifts the rest left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    rooms: Vec<Room>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns the room whose name is byte-for-byte equal to `name`.
    pub fn find(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    /// Replaces the address and port of an existing room with the same name,
    /// or appends the room when the name is new.
    pub fn upsert(&mut self, room: Room) {
        match self.rooms.iter_mut().find(|existing| existing.name == room.name) {
            Some(existing) => {
                existing.address = room.address;
                existing.port = room.port;
            }
            None => self.rooms.push(room),
        }
    }

    /// Removes the room named `name`, returning it.
    pub fn delete(&mut self, name: &str) -> Result<Room> {
        let index = self
            .rooms
            .iter()
            .position(|room| room.name == name)
            .ok_or_else(|| BunkerError::NotFound(name.to_string()))?;
        Ok(self.rooms.remove(index))
    }

    /// Parses the contents of a rooms file, dropping every line that does not
    /// hold a well-formed room. A name that repeats keeps the position of its
    /// first line and the endpoint of its last.
    pub fn parse(contents: &str) -> Self {
        let mut registry = Registry::new();
        for line in contents.lines().filter(|line| !line.is_empty()) {
            let Some(room) = parse_line(line) else {
                warn!(line, "skipping malformed room entry");
                continue;
            };
            if registry.find(&room.name).is_some() {
                warn!(line, "room name repeats, later entry wins");
            }
            registry.upsert(room);
        }
        registry
    }

    /// Serializes every room as `name,address:port`, one per line, each
    /// followed by a newline. An empty registry renders as an empty string.
    pub fn render(&self) -> String {
        self.rooms
            .iter()
            .map(|room| format!("{},{}:{}\n", room.name, room.address, room.port))
            .collect()
    }
}

impl FromIterator<Room> for Registry {
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for room in iter {
            registry.upsert(room);
        }
        registry
    }
}

/// Parses a single `name,address:port` line.
///
/// The line is split once on `,` and the remainder once on `:`. Returns
/// `None` when either separator is missing, the name is empty, or the port
/// is not a decimal number in range.
pub fn parse_line(line: &str) -> Option<Room> {
    let (name, rest) = line.split_once(',')?;
    if name.is_empty() {
        return None;
    }
    let endpoint = Endpoint::parse(rest).ok()?;
    Some(Room::new(name, endpoint.address, endpoint.port))
}

/// Location of the rooms file plus the load and save operations on it.
#[derive(Debug, Clone)]
pub struct RoomStore {
    path: PathBuf,
}

impl RoomStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole rooms file. A missing file is an error; callers must
    /// not save after a failed load.
    pub async fn load(&self) -> Result<Registry> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| BunkerError::Storage {
                action: "read",
                path: self.path.clone(),
                source,
            })?;

        let registry = Registry::parse(&contents);
        debug!(path = %self.path.display(), rooms = registry.len(), "loaded rooms");
        Ok(registry)
    }

    /// Overwrites the rooms file with the full registry.
    ///
    /// The new contents go to a sibling `.tmp` file which is then renamed over
    /// the rooms file, so readers see either the old or the new registry.
    pub async fn save(&self, registry: &Registry) -> Result<()> {
        let staging = self.staging_path();
        let storage_error = |source| BunkerError::Storage {
            action: "write",
            path: self.path.clone(),
            source,
        };

        if let Err(source) = tokio::fs::write(&staging, registry.render()).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(storage_error(source));
        }
        if let Err(source) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(storage_error(source));
        }

        debug!(path = %self.path.display(), rooms = registry.len(), "saved rooms");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        [
            Room::new("lobby", "10.0.0.1", 9000),
            Room::new("dev", "10.0.0.2", 9001),
            Room::new("ops", "10.0.0.3", 9002),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn upsert_existing_name_replaces_in_place() {
        let mut registry = sample();
        registry.upsert(Room::new("dev", "192.168.1.5", 7000));

        assert_eq!(
            registry.rooms(),
            &[
                Room::new("lobby", "10.0.0.1", 9000),
                Room::new("dev", "192.168.1.5", 7000),
                Room::new("ops", "10.0.0.3", 9002),
            ]
        );
    }

    #[test]
    fn upsert_new_name_appends() {
        let mut registry = sample();
        registry.upsert(Room::new("qa", "10.0.0.4", 9003));

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.rooms()[3].name, "qa");
    }

    #[test]
    fn upsert_is_idempotent() {
        let room = Room::new("dev", "172.16.0.9", 4444);
        let mut once = sample();
        once.upsert(room.clone());
        let mut twice = once.clone();
        twice.upsert(room);

        assert_eq!(once, twice);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let mut registry = sample();
        let removed = registry.delete("lobby").expect("lobby exists");

        assert_eq!(removed.name, "lobby");
        assert_eq!(registry.len(), 2);
        assert!(registry.find("lobby").is_none());
        assert_eq!(registry.rooms()[0].name, "dev");
        assert_eq!(registry.rooms()[1].name, "ops");
    }

    #[test]
    fn delete_missing_name_reports_not_found() {
        let mut registry = sample();
        let result = registry.delete("attic");

        assert!(matches!(result, Err(BunkerError::NotFound(name)) if name == "attic"));
        assert_eq!(registry, sample());
    }

    #[test]
    fn find_uses_exact_match() {
        let registry = sample();
        assert!(registry.find("Dev").is_none());
        assert!(registry.find("de").is_none());
        assert_eq!(registry.find("dev").map(|room| room.port), Some(9001));
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let registry = Registry::parse("lobby,10.0.0.1:9000\nbroken,10.0.0.2\n");
        assert_eq!(registry.rooms(), &[Room::new("lobby", "10.0.0.1", 9000)]);
    }

    #[test]
    fn parse_merges_repeated_names() {
        let mut registry = Registry::parse("a,1.1.1.1:1\nb,3.3.3.3:3\na,2.2.2.2:2\n");
        assert_eq!(
            registry.rooms(),
            &[Room::new("a", "2.2.2.2", 2), Room::new("b", "3.3.3.3", 3)]
        );

        registry.delete("a").expect("a exists");
        assert!(registry.find("a").is_none());
    }

    #[test]
    fn parse_line_rejects_missing_separators_and_bad_ports() {
        assert!(parse_line("no-comma 10.0.0.1:9000").is_none());
        assert!(parse_line("lobby,10.0.0.1").is_none());
        assert!(parse_line("lobby,10.0.0.1:port").is_none());
        assert!(parse_line("lobby,10.0.0.1:70000").is_none());
        assert!(parse_line(",10.0.0.1:9000").is_none());
    }

    #[test]
    fn parse_line_accepts_empty_address() {
        assert_eq!(
            parse_line("local,:8080"),
            Some(Room::new("local", "", 8080))
        );
    }

    #[test]
    fn render_writes_one_line_per_room() {
        assert_eq!(
            sample().render(),
            "lobby,10.0.0.1:9000\ndev,10.0.0.2:9001\nops,10.0.0.3:9002\n"
        );
        assert_eq!(Registry::new().render(), "");
    }

    #[test]
    fn room_display_matches_list_format() {
        let room = Room::new("lobby", "10.0.0.1", 9000);
        assert_eq!(room.to_string(), "lobby : 10.0.0.1:9000");
    }
}
