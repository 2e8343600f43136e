// src/tests/router_tests/campaign_tests.rs

use super::{body_string, get, post_form, state_for};
use crate::config::AppConfig;
use crate::db::campaigns::{get_campaign, list_campaigns};
use crate::domain::campaign::CampaignStatus;
use crate::errors::ServerError;
use crate::router::{handle, AppState};
use crate::tests::utils::init_test_db;
use std::time::Duration;

const FORM: &str = "campaign_name=Summer+Outreach&niches=islamic+fashion&keywords=abaya%2C+thobe\
&platforms=instagram&platforms=google_maps&countries=Canada&countries=United+Kingdom&quantity=75";

#[test]
fn create_campaign_redirects_and_persists() {
    let db = init_test_db();
    let resp = handle(post_form("/campaigns", FORM), &state_for(&db)).expect("Handler failed");
    assert_eq!(resp.status(), 302);

    let campaigns = db.with_conn(|conn| list_campaigns(conn)).unwrap();
    assert_eq!(campaigns.len(), 1);
    let c = &campaigns[0];
    assert_eq!(c.campaign_name, "Summer Outreach");
    assert_eq!(c.keywords, vec!["abaya", "thobe"]);
    assert_eq!(c.sources, vec!["instagram", "google_maps"]);
    assert_eq!(c.regions, vec!["Canada", "United Kingdom"]);
    assert_eq!(c.quantity, 75);
    assert_eq!(c.status, CampaignStatus::Active);

    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert_eq!(location, format!("/campaigns?created={}", c.id));
}

#[test]
fn campaign_survives_webhook_failure() {
    let db = init_test_db();
    let config = AppConfig {
        webhook_url: Some("http://127.0.0.1:9/hook".into()),
        webhook_timeout: Duration::from_secs(2),
        ..AppConfig::default()
    };
    let state = AppState::new(db.clone(), &config);

    let resp = handle(post_form("/campaigns", FORM), &state).expect("Handler failed");
    assert_eq!(resp.status(), 302);
    let campaigns = db.with_conn(|conn| list_campaigns(conn)).unwrap();
    assert_eq!(campaigns.len(), 1);

    let location = resp.headers().get("Location").unwrap().to_str().unwrap().to_string();
    assert_eq!(location, format!("/campaigns?created={}&webhook=failed", campaigns[0].id));

    let body = body_string(handle(get(&location), &state).unwrap());
    assert!(body.contains("automation webhook failed"));
    assert!(body.contains("Summer Outreach"));
    assert!(!body.contains("has been notified"));
}

#[test]
fn missing_fields_are_rejected() {
    let db = init_test_db();
    let err = handle(
        post_form("/campaigns", "campaign_name=Half+done&niches=x&keywords=y"),
        &state_for(&db),
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(msg) if msg.contains("required")));
    assert!(db.with_conn(|conn| list_campaigns(conn)).unwrap().is_empty());
}

#[test]
fn toggle_twice_restores_status() {
    let db = init_test_db();
    let state = state_for(&db);
    handle(post_form("/campaigns", FORM), &state).unwrap();
    let id = db.with_conn(|conn| list_campaigns(conn)).unwrap()[0].id;

    let uri = format!("/campaigns/{id}/toggle");
    let resp = handle(post_form(&uri, ""), &state).unwrap();
    assert_eq!(resp.status(), 302);
    let status = db.with_conn(|conn| get_campaign(conn, id)).unwrap().unwrap().status;
    assert_eq!(status, CampaignStatus::Paused);

    handle(post_form(&uri, ""), &state).unwrap();
    let status = db.with_conn(|conn| get_campaign(conn, id)).unwrap().unwrap().status;
    assert_eq!(status, CampaignStatus::Active);
}

#[test]
fn detail_page_and_missing_campaign() {
    let db = init_test_db();
    let state = state_for(&db);
    handle(post_form("/campaigns", FORM), &state).unwrap();
    let id = db.with_conn(|conn| list_campaigns(conn)).unwrap()[0].id;

    let body = body_string(handle(get(&format!("/campaigns/{id}")), &state).unwrap());
    assert!(body.contains("Summer Outreach"));
    assert!(body.contains("Google Maps"));
    assert!(body.contains("No leads found for this campaign yet."));

    assert!(matches!(
        handle(get("/campaigns/999"), &state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/campaigns/abc"), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn search_form_lists_platforms_and_countries() {
    let db = init_test_db();
    let body = body_string(handle(get("/search"), &state_for(&db)).unwrap());
    assert!(body.contains(r#"name="platforms" value="google_maps""#));
    assert!(body.contains("Saudi Arabia"));
}
