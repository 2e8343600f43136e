// src/db/changes.rs
//
// Reads the trigger-maintained `record_changes` log and turns each row into a
// typed event carrying the record's current state.

use rusqlite::{params, Connection};

use super::{campaigns, leads, social_leads};
use crate::domain::campaign::Campaign;
use crate::domain::feed::{ChangeEvent, Collection, EventBatch, Keyed};
use crate::domain::lead::{Lead, SocialLead};
use crate::errors::ServerError;

/// Most events returned by one `events_since` call.
pub const MAX_BATCH: i64 = 500;

/// A record type that has a change feed.
pub trait FeedRecord: Keyed + Sized {
    const COLLECTION: Collection;

    fn fetch(conn: &Connection, id: &str) -> Result<Option<Self>, ServerError>;

    /// Every record, newest first.
    fn list_all(conn: &Connection) -> Result<Vec<Self>, ServerError>;
}

impl FeedRecord for Lead {
    const COLLECTION: Collection = Collection::Leads;

    fn fetch(conn: &Connection, id: &str) -> Result<Option<Self>, ServerError> {
        leads::get_lead(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<Self>, ServerError> {
        leads::list_leads(conn)
    }
}

impl FeedRecord for SocialLead {
    const COLLECTION: Collection = Collection::InstagramLeads;

    fn fetch(conn: &Connection, id: &str) -> Result<Option<Self>, ServerError> {
        social_leads::get_social_lead(conn, id)
    }

    fn list_all(conn: &Connection) -> Result<Vec<Self>, ServerError> {
        social_leads::list_social_leads(conn)
    }
}

impl FeedRecord for Campaign {
    const COLLECTION: Collection = Collection::Campaigns;

    fn fetch(conn: &Connection, id: &str) -> Result<Option<Self>, ServerError> {
        match id.parse::<i64>() {
            Ok(id) => campaigns::get_campaign(conn, id),
            Err(_) => Ok(None),
        }
    }

    fn list_all(conn: &Connection) -> Result<Vec<Self>, ServerError> {
        campaigns::list_campaigns(conn)
    }
}

/// Highest sequence number logged for a collection, 0 when empty.
pub fn latest_seq(conn: &Connection, collection: Collection) -> Result<i64, ServerError> {
    conn.query_row(
        "SELECT COALESCE(MAX(seq), 0) FROM record_changes WHERE collection = ?",
        params![collection.as_str()],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(e.to_string()))
}

/// Events after `cursor`, oldest first, at most `MAX_BATCH` log rows.
///
/// Insert and update events carry the row as it is now. If the row has since
/// been deleted the event is dropped; its delete event comes later in the log.
/// The batch cursor covers every row scanned, dropped ones included.
pub fn events_since<T: FeedRecord>(
    conn: &Connection,
    cursor: i64,
) -> Result<EventBatch<T>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT seq, record_id, kind FROM record_changes
             WHERE collection = ? AND seq > ?
             ORDER BY seq ASC
             LIMIT ?",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![T::COLLECTION.as_str(), cursor, MAX_BATCH], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut events = Vec::new();
    let mut scanned = cursor;
    for r in rows {
        let (seq, id, kind) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        scanned = seq;
        let event = match kind.as_str() {
            "delete" => ChangeEvent::Delete { seq, id },
            "insert" | "update" => {
                let Some(record) = T::fetch(conn, &id)? else {
                    continue;
                };
                if kind == "insert" {
                    ChangeEvent::Insert { seq, record }
                } else {
                    ChangeEvent::Update { seq, record }
                }
            }
            other => {
                tracing::warn!(seq, kind = other, "skipping unknown change kind");
                continue;
            }
        };
        events.push(event);
    }
    Ok(EventBatch {
        events,
        cursor: scanned,
    })
}
