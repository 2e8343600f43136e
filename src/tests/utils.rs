use crate::db::connection::{init_db, Database};
use crate::db::encode_list;
use crate::domain::campaign::NewCampaign;
use crate::domain::lead::{Lead, SocialLead};
use chrono::Utc;
use rusqlite::params;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh database file with the production schema applied.
pub fn init_test_db() -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "outreach_test_{}_{nanos}_{n}.sqlite",
        std::process::id()
    ));

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn sample_lead(id: &str) -> Lead {
    Lead {
        id: id.to_string(),
        created_at: Utc::now(),
        campaign_id: None,
        full_name: None,
        email: None,
        emails: Vec::new(),
        phone: None,
        company_name: None,
        website: None,
        context: None,
        lead_source: None,
        outreach_status: Some("new".into()),
        reply_intent: None,
        last_follow_up_at: None,
        next_follow_up_at: None,
        raw_data: None,
        gender: None,
        attempts: 0,
    }
}

pub fn sample_social_lead(id: &str) -> SocialLead {
    SocialLead {
        id: id.to_string(),
        created_at: Utc::now(),
        campaign_id: None,
        search_term: None,
        username: None,
        url: None,
        fullname: None,
        biography: None,
        status: "new".into(),
    }
}

pub fn new_campaign(name: &str) -> NewCampaign {
    NewCampaign {
        campaign_name: name.to_string(),
        target_niche: "islamic fashion".into(),
        sources: vec!["instagram".into()],
        regions: vec!["Canada".into()],
        keywords: vec!["abaya".into(), "thobe".into()],
        quantity: 50,
    }
}

/// Stand-in for the external ingestion process.
pub fn insert_lead(db: &Database, lead: &Lead) {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO leads (id, created_at, campaign_id, full_name, email, emails, phone,
                company_name, website, context, lead_source, outreach_status, reply_intent,
                last_follow_up_at, next_follow_up_at, raw_data, gender, attempts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                lead.id,
                lead.created_at,
                lead.campaign_id,
                lead.full_name,
                lead.email,
                encode_list(&lead.emails),
                lead.phone,
                lead.company_name,
                lead.website,
                lead.context,
                lead.lead_source,
                lead.outreach_status,
                lead.reply_intent,
                lead.last_follow_up_at,
                lead.next_follow_up_at,
                lead.raw_data.as_ref().map(|v| v.to_string()),
                lead.gender,
                lead.attempts,
            ],
        )?;
        Ok(())
    })
    .unwrap_or_else(|e| panic!("insert lead {} failed: {e}", lead.id));
}

pub fn insert_social_lead(db: &Database, lead: &SocialLead) {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO instagram_leads
                (id, created_at, campaign_id, search_term, username, url, fullname, biography, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                lead.id,
                lead.created_at,
                lead.campaign_id,
                lead.search_term,
                lead.username,
                lead.url,
                lead.fullname,
                lead.biography,
                lead.status,
            ],
        )?;
        Ok(())
    })
    .unwrap_or_else(|e| panic!("insert social lead {} failed: {e}", lead.id));
}
