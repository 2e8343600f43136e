// src/db/social_leads.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::lead::SocialLead;
use crate::errors::ServerError;
use crate::outreach::status::{is_valid_status, Channel};

const SOCIAL_COLUMNS: &str =
    "id, created_at, campaign_id, search_term, username, url, fullname, biography, status";

fn row_to_social_lead(row: &Row) -> rusqlite::Result<SocialLead> {
    let status: Option<String> = row.get(8)?;
    Ok(SocialLead {
        id: row.get(0)?,
        created_at: row.get(1)?,
        campaign_id: row.get(2)?,
        search_term: row.get(3)?,
        username: row.get(4)?,
        url: row.get(5)?,
        fullname: row.get(6)?,
        biography: row.get(7)?,
        status: status.unwrap_or_else(|| "new".to_string()),
    })
}

pub fn list_social_leads(conn: &Connection) -> Result<Vec<SocialLead>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SOCIAL_COLUMNS} FROM instagram_leads ORDER BY created_at DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_social_lead)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut leads = Vec::new();
    for r in rows {
        leads.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(leads)
}

pub fn get_social_lead(conn: &Connection, id: &str) -> Result<Option<SocialLead>, ServerError> {
    conn.query_row(
        &format!("SELECT {SOCIAL_COLUMNS} FROM instagram_leads WHERE id = ?"),
        params![id],
        row_to_social_lead,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select social lead failed: {e}")))
}

/// Set a direct-message status. Values outside the DM list are rejected.
pub fn update_social_lead_status(
    conn: &Connection,
    id: &str,
    status: &str,
) -> Result<(), ServerError> {
    if !is_valid_status(status, Channel::DirectMessage) {
        return Err(ServerError::BadRequest(format!(
            "unknown direct message status: {status}"
        )));
    }

    let updated = conn
        .execute(
            "UPDATE instagram_leads SET status = ? WHERE id = ?",
            params![status, id],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }

    tracing::info!(social_lead_id = id, status, "social lead status updated");
    Ok(())
}
