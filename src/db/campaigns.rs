// src/db/campaigns.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decode_list, encode_list};
use crate::domain::campaign::{Campaign, CampaignStatus, NewCampaign};
use crate::errors::ServerError;

const CAMPAIGN_COLUMNS: &str =
    "id, created_at, campaign_name, target_niche, sources, regions, keywords, quantity, status";

fn row_to_campaign(row: &Row) -> rusqlite::Result<Campaign> {
    let status: String = row.get(8)?;
    Ok(Campaign {
        id: row.get(0)?,
        created_at: row.get(1)?,
        campaign_name: row.get(2)?,
        target_niche: row.get(3)?,
        sources: decode_list(row.get(4)?),
        regions: decode_list(row.get(5)?),
        keywords: decode_list(row.get(6)?),
        quantity: row.get(7)?,
        status: CampaignStatus::parse(&status),
    })
}

/// All campaigns, newest first.
pub fn list_campaigns(conn: &Connection) -> Result<Vec<Campaign>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY created_at DESC, id DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_campaign)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut campaigns = Vec::new();
    for r in rows {
        campaigns.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(campaigns)
}

pub fn get_campaign(conn: &Connection, id: i64) -> Result<Option<Campaign>, ServerError> {
    conn.query_row(
        &format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?"),
        params![id],
        row_to_campaign,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select campaign failed: {e}")))
}

/// Insert a validated campaign as `active` and return the stored row.
pub fn insert_campaign(
    conn: &mut Connection,
    new: &NewCampaign,
    now: DateTime<Utc>,
) -> Result<Campaign, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute(
        "INSERT INTO campaigns
            (created_at, campaign_name, target_niche, sources, regions, keywords, quantity, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            now,
            new.campaign_name,
            new.target_niche,
            encode_list(&new.sources),
            encode_list(&new.regions),
            encode_list(&new.keywords),
            new.quantity,
            CampaignStatus::Active.as_str(),
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert campaign failed: {e}")))?;

    let id = tx.last_insert_rowid();
    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

    Ok(Campaign {
        id,
        created_at: now,
        campaign_name: new.campaign_name.clone(),
        target_niche: Some(new.target_niche.clone()),
        sources: new.sources.clone(),
        regions: new.regions.clone(),
        keywords: new.keywords.clone(),
        quantity: new.quantity,
        status: CampaignStatus::Active,
    })
}

pub fn set_campaign_status(
    conn: &Connection,
    id: i64,
    status: CampaignStatus,
) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "UPDATE campaigns SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Flip active <-> paused and return the new status.
pub fn toggle_campaign_status(conn: &Connection, id: i64) -> Result<CampaignStatus, ServerError> {
    let campaign = get_campaign(conn, id)?.ok_or(ServerError::NotFound)?;
    let next = campaign.status.toggled();
    set_campaign_status(conn, id, next)?;
    Ok(next)
}
