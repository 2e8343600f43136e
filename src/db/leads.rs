// src/db/leads.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::decode_list;
use crate::domain::lead::Lead;
use crate::errors::ServerError;
use crate::outreach::status::{is_sent_status, is_valid_status, Channel, FollowUpSchedule};

const LEAD_COLUMNS: &str = "id, created_at, campaign_id, full_name, email, emails, phone, \
     company_name, website, context, lead_source, outreach_status, reply_intent, \
     last_follow_up_at, next_follow_up_at, raw_data, gender, attempts";

fn row_to_lead(row: &Row) -> rusqlite::Result<Lead> {
    let raw_data: Option<String> = row.get(15)?;
    Ok(Lead {
        id: row.get(0)?,
        created_at: row.get(1)?,
        campaign_id: row.get(2)?,
        full_name: row.get(3)?,
        email: row.get(4)?,
        emails: decode_list(row.get(5)?),
        phone: row.get(6)?,
        company_name: row.get(7)?,
        website: row.get(8)?,
        context: row.get(9)?,
        lead_source: row.get(10)?,
        outreach_status: row.get(11)?,
        reply_intent: row.get(12)?,
        last_follow_up_at: row.get(13)?,
        next_follow_up_at: row.get(14)?,
        raw_data: raw_data.and_then(|s| serde_json::from_str(&s).ok()),
        gender: row.get(16)?,
        attempts: row.get(17)?,
    })
}

fn query_leads(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Lead>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params, row_to_lead)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut leads = Vec::new();
    for r in rows {
        leads.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(leads)
}

/// All leads, newest first.
pub fn list_leads(conn: &Connection) -> Result<Vec<Lead>, ServerError> {
    query_leads(
        conn,
        &format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC"),
        [],
    )
}

pub fn list_leads_for_campaign(conn: &Connection, campaign_id: i64) -> Result<Vec<Lead>, ServerError> {
    query_leads(
        conn,
        &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE campaign_id = ? ORDER BY created_at DESC"),
        params![campaign_id],
    )
}

pub fn get_lead(conn: &Connection, id: &str) -> Result<Option<Lead>, ServerError> {
    conn.query_row(
        &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?"),
        params![id],
        row_to_lead,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select lead failed: {e}")))
}

/// Move a lead to a new email-sequence status.
///
/// Sending stages stamp the follow-up dates and count an attempt. Other
/// statuses leave the dates as they were.
pub fn update_lead_status(
    conn: &Connection,
    id: &str,
    status: &str,
    now: DateTime<Utc>,
) -> Result<(), ServerError> {
    if !is_valid_status(status, Channel::Email) {
        return Err(ServerError::BadRequest(format!("unknown email status: {status}")));
    }

    let schedule = FollowUpSchedule::for_status(status, now);
    let attempt = i64::from(is_sent_status(status));

    let updated = conn
        .execute(
            "UPDATE leads SET
                outreach_status = ?1,
                last_follow_up_at = COALESCE(?2, last_follow_up_at),
                next_follow_up_at = COALESCE(?3, next_follow_up_at),
                attempts = attempts + ?4
             WHERE id = ?5",
            params![
                status,
                schedule.map(|s| s.last_follow_up_at),
                schedule.map(|s| s.next_follow_up_at),
                attempt,
                id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update lead status failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }

    tracing::info!(lead_id = id, status, "lead status updated");
    Ok(())
}
