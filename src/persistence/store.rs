use chrono::Utc;

use super::record::{CoasterRecord, CoasterSummary, NewCoaster};

/// CRUD resource over saved coasters. Implementations back onto a remote
/// service or, for tests and local sessions, onto [`MemoryStore`]. Misses
/// surface as `None`/`false` sentinels; local editing state never depends
/// on a call succeeding.
pub trait CoasterStore {
    /// Summaries of every saved coaster, newest first.
    fn list(&self) -> Vec<CoasterSummary>;

    fn get(&self, id: i64) -> Option<CoasterRecord>;

    /// Stores a coaster, assigning its id and timestamps.
    fn create(&mut self, coaster: NewCoaster) -> CoasterRecord;

    /// Removes a coaster. Returns false when the id is unknown.
    fn delete(&mut self, id: i64) -> bool;
}

/// Pretty-printed JSON export of a stored coaster, or `None` when the id
/// is unknown.
pub fn export_json(store: &dyn CoasterStore, id: i64) -> Option<String> {
    let record = store.get(id)?;
    serde_json::to_string_pretty(&record).ok()
}

/// In-memory store with the same observable behavior as the remote
/// service: serial ids, server-assigned timestamps, newest-first listing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<CoasterRecord>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoasterStore for MemoryStore {
    fn list(&self) -> Vec<CoasterSummary> {
        let mut summaries: Vec<CoasterSummary> = self
            .records
            .iter()
            .map(|record| CoasterSummary {
                id: record.id,
                name: record.name.clone(),
                updated_at: record.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        summaries
    }

    fn get(&self, id: i64) -> Option<CoasterRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    fn create(&mut self, coaster: NewCoaster) -> CoasterRecord {
        self.next_id += 1;
        let now = Utc::now();
        let record = CoasterRecord {
            id: self.next_id,
            name: coaster.name,
            track_points: coaster.track_points,
            loop_segments: coaster.loop_segments,
            is_looped: coaster.is_looped,
            has_chain_lift: coaster.has_chain_lift,
            show_wood_supports: coaster.show_wood_supports,
            created_at: now,
            updated_at: now,
        };
        self.records.push(record.clone());
        log::debug!("stored coaster {} ({:?})", record.id, record.name);
        record
    }

    fn delete(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_coaster(name: &str) -> NewCoaster {
        NewCoaster {
            name: name.to_string(),
            track_points: Vec::new(),
            loop_segments: Vec::new(),
            is_looped: false,
            has_chain_lift: true,
            show_wood_supports: false,
        }
    }

    #[test]
    fn create_assigns_serial_ids_and_timestamps() {
        let mut store = MemoryStore::new();
        let a = store.create(new_coaster("a"));
        let b = store.create(new_coaster("b"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = MemoryStore::new();
        store.create(new_coaster("first"));
        store.create(new_coaster("second"));
        let names: Vec<String> = store.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn get_and_delete_miss_return_sentinels() {
        let mut store = MemoryStore::new();
        assert!(store.get(42).is_none());
        assert!(!store.delete(42));
    }

    #[test]
    fn delete_removes_the_record() {
        let mut store = MemoryStore::new();
        let record = store.create(new_coaster("doomed"));
        assert!(store.delete(record.id));
        assert!(store.get(record.id).is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn export_round_trips_through_json() {
        let mut store = MemoryStore::new();
        let record = store.create(new_coaster("exported"));
        let json = export_json(&store, record.id).unwrap();
        let parsed: CoasterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(export_json(&store, 999).is_none());
    }
}
