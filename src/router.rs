use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use astra::Request;
use chrono::Utc;
use serde::Serialize;

use crate::config::AppConfig;
use crate::db::{campaigns, changes, leads, social_leads, Database};
use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::feed::{ChangeEvent, Collection};
use crate::domain::filters::{LeadFilter, SocialLeadFilter};
use crate::domain::lead::{Lead, SocialLead};
use crate::domain::metrics::{
    DashboardMetrics, DirectMessageStats, EmailOutreachStats, OutreachOverview,
};
use crate::errors::ServerError;
use crate::outreach::LineFocus;
use crate::responses::{css_response, html_response, json_response, redirect, ResultResp, MAIN_CSS};
use crate::spreadsheets::export_leads_xlsx;
use crate::templates::pages;
use crate::webhook;

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        Self {
            db,
            webhook_url: config.webhook_url.clone(),
            webhook_timeout: config.webhook_timeout,
        }
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(req.uri().query());

    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) | ("GET", ["dashboard"]) => dashboard(state),
        ("GET", ["health"]) => json_response(&serde_json::json!({ "status": "ok" })),
        ("GET", ["static", "main.css"]) => css_response(MAIN_CSS),

        ("GET", ["search"]) => html_response(pages::search_page(None)),
        ("GET", ["campaigns"]) => list_campaigns(state, &query),
        ("POST", ["campaigns"]) => {
            let form = read_form(req)?;
            create_campaign(state, &form)
        }
        ("GET", ["campaigns", id]) => campaign_detail(state, parse_id(id)?),
        ("POST", ["campaigns", id, "toggle"]) => toggle_campaign(state, parse_id(id)?),

        ("GET", ["crm"]) => crm(state),
        ("GET", ["crm", "export"]) => {
            let leads = state.db.with_conn(|conn| leads::list_leads(conn))?;
            let filename = format!("leads_{}.xlsx", Utc::now().format("%Y-%m-%d"));
            export_leads_xlsx(&leads, &filename)
        }

        ("GET", ["outreach"]) => outreach_overview(state),
        ("GET", ["outreach", "manual"]) => manual_list(state, &query),
        ("GET", ["outreach", "manual", id]) => {
            let lead = state
                .db
                .with_conn(|conn| social_leads::get_social_lead(conn, id))?
                .ok_or(ServerError::NotFound)?;
            html_response(pages::manual_detail_page(&lead))
        }
        ("POST", ["outreach", "manual", id, "status"]) => {
            let id = id.to_string();
            let form = read_form(req)?;
            let status = form_value(&form, "status")?;
            state
                .db
                .with_conn(|conn| social_leads::update_social_lead_status(conn, &id, status))?;
            redirect(&format!("/outreach/manual/{id}"))
        }

        ("GET", ["outreach", "automated"]) => automated_list(state, &query),
        ("GET", ["outreach", "automated", id]) => {
            let lead = state
                .db
                .with_conn(|conn| leads::get_lead(conn, id))?
                .ok_or(ServerError::NotFound)?;
            let focus = query.get("line").and_then(|l| LineFocus::parse(l));
            html_response(pages::automated_detail_page(&lead, focus))
        }
        ("POST", ["outreach", "automated", id, "status"]) => {
            let id = id.to_string();
            let form = read_form(req)?;
            let status = form_value(&form, "status")?;
            state
                .db
                .with_conn(|conn| leads::update_lead_status(conn, &id, status, Utc::now()))?;
            redirect(&format!("/outreach/automated/{id}"))
        }

        ("GET", ["api", "changes", collection]) => {
            let collection = Collection::parse(collection).ok_or(ServerError::NotFound)?;
            let since = match query.get("since") {
                Some(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| ServerError::BadRequest(format!("invalid cursor: {raw}")))?,
                None => 0,
            };
            change_feed(state, collection, since)
        }

        _ => Err(ServerError::NotFound),
    }
}

// ---------- handlers ----------

fn dashboard(state: &AppState) -> ResultResp {
    let (campaigns, leads) = state.db.with_conn(|conn| {
        Ok((campaigns::list_campaigns(conn)?, leads::list_leads(conn)?))
    })?;
    let metrics = DashboardMetrics::compute(&campaigns, &leads, Utc::now());
    html_response(pages::dashboard_page(&metrics))
}

const WEBHOOK_FAILED: &str =
    "Campaign saved, but the automation webhook failed. See the server log for details.";

fn list_campaigns(state: &AppState, query: &HashMap<String, String>) -> ResultResp {
    let campaigns = state.db.with_conn(|conn| campaigns::list_campaigns(conn))?;
    let flash = match (query.get("created"), query.get("webhook").map(String::as_str)) {
        (Some(_), Some("failed")) => Some(("warning", WEBHOOK_FAILED)),
        (Some(_), _) => Some(("success", "Campaign created. The automation has been notified.")),
        (None, _) => None,
    };
    html_response(pages::campaigns_page(&campaigns, flash))
}

fn create_campaign(state: &AppState, form: &[(String, String)]) -> ResultResp {
    let field = |key: &str| {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    };
    let all = |key: &str| -> Vec<String> {
        form.iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect()
    };

    let quantity = match field("quantity").trim() {
        "" => None,
        raw => Some(
            raw.parse::<i64>()
                .map_err(|_| ServerError::BadRequest(format!("invalid quantity: {raw}")))?,
        ),
    };

    let new = NewCampaign::validate(
        field("campaign_name"),
        field("niches"),
        field("keywords"),
        all("platforms"),
        all("countries"),
        quantity,
    )?;

    let campaign = state
        .db
        .with_conn(|conn| campaigns::insert_campaign(conn, &new, Utc::now()))?;
    tracing::info!(campaign_id = campaign.id, name = %campaign.campaign_name, "campaign created");

    match webhook::dispatch(state.webhook_url.as_deref(), state.webhook_timeout, &campaign) {
        None => redirect(&format!("/campaigns?created={}", campaign.id)),
        Some(_) => redirect(&format!("/campaigns?created={}&webhook=failed", campaign.id)),
    }
}

fn campaign_detail(state: &AppState, id: i64) -> ResultResp {
    let (campaign, leads) = state.db.with_conn(|conn| {
        let campaign = campaigns::get_campaign(conn, id)?.ok_or(ServerError::NotFound)?;
        let leads = leads::list_leads_for_campaign(conn, id)?;
        Ok((campaign, leads))
    })?;
    html_response(pages::campaign_detail_page(&campaign, &leads))
}

fn toggle_campaign(state: &AppState, id: i64) -> ResultResp {
    let status = state
        .db
        .with_conn(|conn| campaigns::toggle_campaign_status(conn, id))?;
    tracing::info!(campaign_id = id, status = status.as_str(), "campaign toggled");
    redirect("/campaigns")
}

fn crm(state: &AppState) -> ResultResp {
    let (leads, cursor) = state.db.with_conn(|conn| {
        Ok((
            leads::list_leads(conn)?,
            changes::latest_seq(conn, Collection::Leads)?,
        ))
    })?;
    html_response(pages::crm_page(&leads, cursor))
}

fn outreach_overview(state: &AppState) -> ResultResp {
    let (campaigns, leads, social) = state.db.with_conn(|conn| {
        Ok((
            campaigns::list_campaigns(conn)?,
            leads::list_leads(conn)?,
            social_leads::list_social_leads(conn)?,
        ))
    })?;
    let overview = OutreachOverview::compute(&campaigns, &leads, Utc::now());
    let dm = DirectMessageStats::compute(&social);
    html_response(pages::outreach_page(&overview, &dm))
}

fn manual_list(state: &AppState, query: &HashMap<String, String>) -> ResultResp {
    let (all, cursor) = state.db.with_conn(|conn| {
        Ok((
            social_leads::list_social_leads(conn)?,
            changes::latest_seq(conn, Collection::InstagramLeads)?,
        ))
    })?;
    let filter = SocialLeadFilter {
        search: query.get("q").cloned().unwrap_or_default(),
        status: query.get("status").cloned().unwrap_or_default(),
    };
    let vm = pages::ManualListVm {
        leads: filter.apply(&all),
        stats: DirectMessageStats::compute(&all),
        filter: &filter,
        cursor,
    };
    html_response(pages::manual_list_page(&vm))
}

fn automated_list(state: &AppState, query: &HashMap<String, String>) -> ResultResp {
    let (all, cursor) = state.db.with_conn(|conn| {
        Ok((
            leads::list_leads(conn)?,
            changes::latest_seq(conn, Collection::Leads)?,
        ))
    })?;
    let filter = LeadFilter {
        search: query.get("q").cloned().unwrap_or_default(),
        status: query.get("status").cloned().unwrap_or_default(),
        source: query.get("source").cloned().unwrap_or_default(),
    };
    let vm = pages::AutomatedListVm {
        leads: filter.apply(&all),
        stats: EmailOutreachStats::compute(&all),
        filter: &filter,
        cursor,
    };
    html_response(pages::automated_list_page(&vm))
}

#[derive(Serialize)]
struct FeedBatch<T> {
    collection: &'static str,
    /// Pass back as `since` to continue after this batch.
    cursor: i64,
    events: Vec<ChangeEvent<T>>,
}

fn feed_batch<T: changes::FeedRecord + Serialize>(state: &AppState, since: i64) -> ResultResp {
    let batch = state
        .db
        .with_conn(|conn| changes::events_since::<T>(conn, since))?;
    json_response(&FeedBatch {
        collection: T::COLLECTION.as_str(),
        cursor: batch.cursor,
        events: batch.events,
    })
}

fn change_feed(state: &AppState, collection: Collection, since: i64) -> ResultResp {
    match collection {
        Collection::Campaigns => feed_batch::<Campaign>(state, since),
        Collection::Leads => feed_batch::<Lead>(state, since),
        Collection::InstagramLeads => feed_batch::<SocialLead>(state, since),
    }
}

// ---------- request parsing ----------

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// Decode an `application/x-www-form-urlencoded` body. Repeated keys are kept.
fn read_form(req: Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn form_value<'a>(form: &'a [(String, String)], key: &str) -> Result<&'a str, ServerError> {
    form.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| ServerError::BadRequest(format!("missing field: {key}")))
}
