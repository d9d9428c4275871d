//! Persisted session history.
//!
//! Sessions are held oldest first in memory. Every mutation rewrites the full
//! list to the blob store under a single key.

use super::{codec, Session};
use crate::error::LapwatchError;
use crate::storage::BlobStore;

/// The list of finished sessions and its backing blob store.
pub struct SessionStore<B: BlobStore> {
    blobs: B,
    key: String,
    sessions: Vec<Session>,
}

impl<B: BlobStore> SessionStore<B> {
    /// Restore the history stored under `key`.
    ///
    /// A missing, unreadable, or malformed blob yields an empty history.
    pub fn load(blobs: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut sessions = match blobs.get(&key) {
            Ok(Some(blob)) => codec::decode(&blob).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "discarding unreadable session history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read session history");
                Vec::new()
            }
        };

        reassign_duplicate_ids(&mut sessions);

        tracing::debug!(key = %key, count = sessions.len(), "session history loaded");
        Self {
            blobs,
            key,
            sessions,
        }
    }

    /// Add a session as the most recent entry and persist.
    ///
    /// A session whose id is already taken is given the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written. The session is kept
    /// in memory either way.
    pub fn add_session(&mut self, mut session: Session) -> Result<(), LapwatchError> {
        if self.get(session.id()).is_some() {
            let id = next_free_id(&self.sessions, session.id());
            tracing::debug!(from = session.id(), to = %id, "session id collision");
            session.assign_id(id);
        }

        tracing::info!(
            id = session.id(),
            total_ms = session.total_elapsed_ms(),
            laps = session.laps().len(),
            "session saved"
        );
        self.sessions.push(session);
        self.persist()
    }

    /// Delete the session with `id` and persist. Returns whether one was removed.
    ///
    /// An unknown id leaves the history untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    pub fn delete_session(&mut self, id: &str) -> Result<bool, LapwatchError> {
        let Some(index) = self.sessions.iter().position(|s| s.id() == id) else {
            return Ok(false);
        };

        self.sessions.remove(index);
        tracing::info!(id, "session deleted");
        self.persist()?;
        Ok(true)
    }

    /// Remove every session and delete the persisted blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be removed.
    pub fn clear_all(&mut self) -> Result<(), LapwatchError> {
        let count = self.sessions.len();
        self.sessions.clear();
        self.blobs.remove(&self.key)?;
        tracing::info!(count, "session history cleared");
        Ok(())
    }

    /// Sessions, oldest first.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Sessions, most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter().rev()
    }

    /// Look up a session by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Release the backing blob store.
    pub fn into_inner(self) -> B {
        self.blobs
    }

    fn persist(&mut self) -> Result<(), LapwatchError> {
        let blob = codec::encode(&self.sessions)?;
        self.blobs.set(&self.key, &blob).inspect_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "failed to persist session history");
        })
    }
}

fn next_free_id(sessions: &[Session], taken: &str) -> String {
    let mut candidate = taken.parse::<i64>().unwrap_or(0);
    loop {
        candidate += 1;
        let id = candidate.to_string();
        if !sessions.iter().any(|s| s.id() == id) {
            return id;
        }
    }
}

/// Give every later holder of an already-used id a fresh one.
fn reassign_duplicate_ids(sessions: &mut [Session]) {
    for i in 1..sessions.len() {
        let taken = sessions[..i].iter().any(|s| s.id() == sessions[i].id());
        if taken {
            let id = next_free_id(sessions, sessions[i].id());
            tracing::warn!(from = sessions[i].id(), to = %id, "duplicate session id in history");
            sessions[i].assign_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::features::stopwatch::LapRecord;
    use crate::storage::{MemoryBlobStore, SqliteBlobStore};

    const KEY: &str = "stopwatch-sessions";

    fn session_at(secs: i64, total_ms: u64) -> Session {
        let at = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        let laps = vec![LapRecord {
            sequence: 1,
            cumulative_ms: total_ms / 2,
            split_ms: total_ms / 2,
        }];
        Session::finalize(total_ms, laps, at)
    }

    fn reload(store: SessionStore<MemoryBlobStore>) -> SessionStore<MemoryBlobStore> {
        SessionStore::load(store.into_inner(), KEY)
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = SessionStore::load(MemoryBlobStore::new(), KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_blob_is_empty() {
        let blobs = MemoryBlobStore::with_entry(KEY, "{definitely not sessions");
        let store = SessionStore::load(blobs, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_session_persists_newest_first() {
        let mut store = SessionStore::load(MemoryBlobStore::new(), KEY);
        store.add_session(session_at(0, 1_000)).unwrap();
        store.add_session(session_at(60, 2_000)).unwrap();

        let newest: Vec<u64> = store.newest_first().map(Session::total_elapsed_ms).collect();
        assert_eq!(newest, vec![2_000, 1_000]);

        let store = reload(store);
        assert_eq!(store.len(), 2);
        assert_eq!(store.sessions()[0].total_elapsed_ms(), 1_000);
        assert_eq!(store.sessions()[1].laps()[0].split_ms, 1_000);
    }

    #[test]
    fn test_add_session_with_taken_id() {
        let mut store = SessionStore::load(MemoryBlobStore::new(), KEY);
        store.add_session(session_at(0, 1_000)).unwrap();
        store.add_session(session_at(0, 2_000)).unwrap();

        assert_eq!(store.len(), 2);
        let first: i64 = store.sessions()[0].id().parse().unwrap();
        let second: i64 = store.sessions()[1].id().parse().unwrap();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_load_reassigns_duplicate_ids() {
        let blob = r#"[
            {"id":"1","date":"2024-03-01T12:01:40.000Z","totalTime":900,"lapTimes":[]},
            {"id":"1","date":"2024-03-01T12:00:00.000Z","totalTime":1500,"lapTimes":[]}
        ]"#;
        let mut store = SessionStore::load(MemoryBlobStore::with_entry(KEY, blob), KEY);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("1").unwrap().total_elapsed_ms(), 1_500);
        assert_eq!(store.get("2").unwrap().total_elapsed_ms(), 900);

        assert!(store.delete_session("1").unwrap());
        assert!(store.get("1").is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions()[0].total_elapsed_ms(), 900);
    }

    #[test]
    fn test_delete_session() {
        let mut store = SessionStore::load(MemoryBlobStore::new(), KEY);
        store.add_session(session_at(0, 1_000)).unwrap();
        store.add_session(session_at(60, 2_000)).unwrap();

        let id = store.sessions()[0].id().to_string();
        assert!(store.delete_session(&id).unwrap());
        assert!(store.get(&id).is_none());

        let store = reload(store);
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions()[0].total_elapsed_ms(), 2_000);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = SessionStore::load(MemoryBlobStore::new(), KEY);
        store.add_session(session_at(0, 1_000)).unwrap();
        let before = store.sessions().to_vec();

        assert!(!store.delete_session("no-such-session").unwrap());
        assert_eq!(store.sessions(), before.as_slice());
    }

    #[test]
    fn test_clear_all_removes_blob() {
        let mut store = SessionStore::load(MemoryBlobStore::new(), KEY);
        store.add_session(session_at(0, 1_000)).unwrap();

        store.clear_all().unwrap();
        assert!(store.is_empty());

        let blobs = store.into_inner();
        assert!(!blobs.contains(KEY));

        let store = SessionStore::load(blobs, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_sqlite_backed_history() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("lapwatch.db");

        {
            let db = crate::storage::Database::open_at(&path).unwrap();
            let mut store = SessionStore::load(SqliteBlobStore::new(db), KEY);
            store.add_session(session_at(0, 4_200)).unwrap();
        }

        let db = crate::storage::Database::open_at(&path).unwrap();
        let store = SessionStore::load(SqliteBlobStore::new(db), KEY);
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions()[0].total_elapsed_ms(), 4_200);
    }
}
