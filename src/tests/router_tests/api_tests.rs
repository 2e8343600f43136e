// src/tests/router_tests/api_tests.rs

use super::{body_string, get, post_form, state_for};
use crate::db::changes::MAX_BATCH;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{init_test_db, insert_lead, sample_lead};
use serde_json::Value;

fn feed(db: &crate::db::Database, uri: &str) -> Value {
    let resp = handle(get(uri), &state_for(db)).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    serde_json::from_str(&body_string(resp)).unwrap()
}

#[test]
fn change_feed_streams_lead_events() {
    let db = init_test_db();
    insert_lead(&db, &sample_lead("l1"));

    let first = feed(&db, "/api/changes/leads?since=0");
    assert_eq!(first["collection"], "leads");
    assert_eq!(first["events"][0]["event"], "INSERT");
    assert_eq!(first["events"][0]["record"]["id"], "l1");
    let cursor = first["cursor"].as_i64().unwrap();
    assert!(cursor > 0);

    handle(
        post_form("/outreach/automated/l1/status", "status=replied"),
        &state_for(&db),
    )
    .unwrap();

    let next = feed(&db, &format!("/api/changes/leads?since={cursor}"));
    let events = next["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "UPDATE");
    assert_eq!(events[0]["record"]["outreach_status"], "replied");
}

#[test]
fn empty_feed_keeps_cursor() {
    let db = init_test_db();
    let body = feed(&db, "/api/changes/instagram_leads?since=42");
    assert_eq!(body["cursor"], 42);
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[test]
fn bad_collection_or_cursor() {
    let db = init_test_db();
    let state = state_for(&db);
    assert!(matches!(
        handle(get("/api/changes/users"), &state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/api/changes/leads?since=abc"), &state),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn feed_cursor_skips_vanished_rows() {
    let db = init_test_db();
    insert_lead(&db, &sample_lead("gone"));
    db.with_conn(|conn| {
        for i in 0..MAX_BATCH {
            conn.execute("UPDATE leads SET attempts = ? WHERE id = 'gone'", [i + 1])?;
        }
        conn.execute("DELETE FROM leads WHERE id = 'gone'", [])?;
        Ok(())
    })
    .unwrap();

    let first = feed(&db, "/api/changes/leads?since=0");
    assert!(first["events"].as_array().unwrap().is_empty());
    assert_eq!(first["cursor"], MAX_BATCH);

    let next = feed(&db, &format!("/api/changes/leads?since={}", first["cursor"]));
    assert_eq!(next["events"][0]["event"], "DELETE");
    assert_eq!(next["events"][0]["id"], "gone");
}
