// src/domain/feed.rs

use serde::Serialize;

use super::campaign::Campaign;
use super::lead::{Lead, SocialLead};

/// Record collections that publish changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Campaigns,
    Leads,
    InstagramLeads,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Campaigns => "campaigns",
            Collection::Leads => "leads",
            Collection::InstagramLeads => "instagram_leads",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "campaigns" => Some(Collection::Campaigns),
            "leads" => Some(Collection::Leads),
            "instagram_leads" => Some(Collection::InstagramLeads),
            _ => None,
        }
    }
}

/// One entry from the change feed, in commit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "UPPERCASE")]
pub enum ChangeEvent<T> {
    Insert { seq: i64, record: T },
    Update { seq: i64, record: T },
    Delete { seq: i64, id: String },
}

impl<T> ChangeEvent<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::Insert { .. } => "insert",
            ChangeEvent::Update { .. } => "update",
            ChangeEvent::Delete { .. } => "delete",
        }
    }

    pub fn seq(&self) -> i64 {
        match self {
            ChangeEvent::Insert { seq, .. }
            | ChangeEvent::Update { seq, .. }
            | ChangeEvent::Delete { seq, .. } => *seq,
        }
    }
}

/// Events read from the log plus the position to resume from.
///
/// `cursor` is the highest sequence number scanned, which can be past the
/// last event when rows were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBatch<T> {
    pub events: Vec<ChangeEvent<T>>,
    pub cursor: i64,
}

/// Records addressable by a string identifier.
pub trait Keyed {
    fn key(&self) -> String;
}

impl Keyed for Lead {
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for SocialLead {
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for Campaign {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// View-owned list of records kept current by applying change events.
///
/// Newest records sit first, matching the `created_at DESC` order of the
/// initial load. Events at or below the cursor are ignored, so replaying a
/// batch is harmless.
#[derive(Debug, Clone)]
pub struct RecordSet<T> {
    records: Vec<T>,
    cursor: i64,
}

impl<T: Keyed> RecordSet<T> {
    pub fn new(records: Vec<T>, cursor: i64) -> Self {
        Self { records, cursor }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.records.iter().find(|r| r.key() == key)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }

    /// Returns `false` when the event was stale and nothing changed.
    pub fn apply(&mut self, event: ChangeEvent<T>) -> bool {
        let seq = event.seq();
        if seq <= self.cursor {
            return false;
        }
        self.cursor = seq;

        match event {
            ChangeEvent::Insert { record, .. } => match self.position(&record.key()) {
                Some(i) => self.records[i] = record,
                None => self.records.insert(0, record),
            },
            ChangeEvent::Update { record, .. } => {
                if let Some(i) = self.position(&record.key()) {
                    self.records[i] = record;
                }
            }
            ChangeEvent::Delete { id, .. } => self.records.retain(|r| r.key() != id),
        }
        true
    }

    /// Move the cursor forward without touching records. Never moves back.
    pub fn advance_to(&mut self, seq: i64) {
        self.cursor = self.cursor.max(seq);
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = ChangeEvent<T>>) -> usize {
        let mut applied = 0;
        for event in events {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        status: &'static str,
    }

    impl Keyed for Row {
        fn key(&self) -> String {
            self.id.to_string()
        }
    }

    fn row(id: &'static str, status: &'static str) -> Row {
        Row { id, status }
    }

    fn ids(set: &RecordSet<Row>) -> Vec<&'static str> {
        set.records().iter().map(|r| r.id).collect()
    }

    #[test]
    fn insert_prepends_newest_first() {
        let mut set = RecordSet::new(vec![row("a", "new")], 0);
        assert!(set.apply(ChangeEvent::Insert { seq: 1, record: row("b", "new") }));
        assert_eq!(ids(&set), vec!["b", "a"]);
        assert_eq!(set.cursor(), 1);
    }

    #[test]
    fn insert_of_known_id_replaces_in_place() {
        let mut set = RecordSet::new(vec![row("a", "new"), row("b", "new")], 0);
        set.apply(ChangeEvent::Insert { seq: 1, record: row("b", "contacted") });
        assert_eq!(ids(&set), vec!["a", "b"]);
        assert_eq!(set.get("b").unwrap().status, "contacted");
    }

    #[test]
    fn update_replaces_by_id_and_ignores_unknown() {
        let mut set = RecordSet::new(vec![row("a", "new")], 0);
        set.apply(ChangeEvent::Update { seq: 1, record: row("a", "replied") });
        set.apply(ChangeEvent::Update { seq: 2, record: row("zzz", "replied") });
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").unwrap().status, "replied");
    }

    #[test]
    fn delete_filters_out_by_id() {
        let mut set = RecordSet::new(vec![row("a", "new"), row("b", "new")], 0);
        set.apply(ChangeEvent::Delete { seq: 1, id: "a".into() });
        assert_eq!(ids(&set), vec!["b"]);
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut set = RecordSet::new(vec![row("a", "new")], 5);
        assert!(!set.apply(ChangeEvent::Delete { seq: 5, id: "a".into() }));
        assert!(!set.apply(ChangeEvent::Delete { seq: 3, id: "a".into() }));
        assert_eq!(set.len(), 1);

        let applied = set.apply_all(vec![
            ChangeEvent::Update { seq: 4, record: row("a", "closed") },
            ChangeEvent::Update { seq: 6, record: row("a", "replied") },
        ]);
        assert_eq!(applied, 1);
        assert_eq!(set.get("a").unwrap().status, "replied");
    }

    #[test]
    fn batch_cursor_moves_past_skipped_rows() {
        let mut set = RecordSet::new(vec![row("a", "new")], 2);
        assert_eq!(
            set.apply_all(vec![ChangeEvent::Update { seq: 3, record: row("a", "replied") }]),
            1
        );
        set.advance_to(9);
        assert_eq!(set.cursor(), 9);

        set.advance_to(4);
        assert_eq!(set.cursor(), 9);
        assert!(!set.apply(ChangeEvent::Delete { seq: 7, id: "a".into() }));
    }

    #[test]
    fn collection_names_round_trip() {
        for c in [Collection::Campaigns, Collection::Leads, Collection::InstagramLeads] {
            assert_eq!(Collection::parse(c.as_str()), Some(c));
        }
        assert_eq!(Collection::parse("users"), None);
    }
}
