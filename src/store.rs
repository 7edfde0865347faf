use crate::election::Election;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no election snapshot at {0}; run `init` first")]
    Missing(PathBuf),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    election: Election,
}

/// Durable JSON snapshot of the election state.
///
/// Each command loads the snapshot, applies one mutation, and saves it
/// back, so every command is one individually-committed transaction.
/// Saves write to a temp file and rename into place; a concurrent
/// reader never sees a half-written snapshot.
pub struct ElectionStore {
    path: PathBuf,
}

impl ElectionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> StoreResult<Election> {
        match self.read_snapshot()? {
            Some(snapshot) => Ok(snapshot.election),
            None => Err(StoreError::Missing(self.path.clone())),
        }
    }

    pub fn save(&self, election: &Election) -> StoreResult<()> {
        let created_at = match self.read_snapshot() {
            Ok(Some(previous)) => previous.created_at,
            _ => Utc::now(),
        };
        let snapshot = Snapshot {
            created_at,
            updated_at: Utc::now(),
            election: election.clone(),
        };
        let raw = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read_snapshot(&self) -> StoreResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> ElectionStore {
        let path = std::env::temp_dir().join(format!(
            "runoff-vote-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        ElectionStore::new(path)
    }

    #[test]
    fn missing_snapshot_is_a_typed_error() {
        let store = temp_store("missing");
        match store.load() {
            Err(StoreError::Missing(path)) => assert_eq!(path, store.path()),
            other => panic!("expected Missing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn round_trips_election_state() {
        let store = temp_store("roundtrip");
        let mut election = Election::new("0xadmin", 3);
        election.add_candidate("0xadmin", "alice").unwrap();
        election.add_candidate("0xadmin", "bob").unwrap();
        election.cast_vote("0xv1", "alice").unwrap();
        store.save(&election).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.candidates(), election.candidates());
        assert_eq!(loaded.status().total_votes, 1);
        assert!(loaded.has_voted("0xv1"));

        let _ = fs::remove_file(store.path());
    }
}
