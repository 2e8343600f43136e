// src/tests/router_tests/dashboard_tests.rs

use super::{body_string, get, state_for};
use crate::router::handle;
use crate::tests::utils::{init_test_db, insert_lead, sample_lead};

#[test]
fn dashboard_renders_counts() {
    let db = init_test_db();
    let mut lead = sample_lead("l1");
    lead.lead_source = Some("google_maps".into());
    insert_lead(&db, &lead);

    let resp = handle(get("/dashboard"), &state_for(&db)).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Dashboard"));
    assert!(body.contains("Leads by Source"));
    assert!(body.contains("Google Maps"));
}

#[test]
fn root_is_the_dashboard_on_an_empty_db() {
    let db = init_test_db();
    let resp = handle(get("/"), &state_for(&db)).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("No leads yet."));
}

#[test]
fn unknown_path_is_not_found() {
    let db = init_test_db();
    let err = handle(get("/nope"), &state_for(&db)).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::NotFound));
}

#[test]
fn health_reports_ok() {
    let db = init_test_db();
    let resp = handle(get("/health"), &state_for(&db)).unwrap();
    assert_eq!(body_string(resp), r#"{"status":"ok"}"#);
}

#[test]
fn stylesheet_is_served() {
    let db = init_test_db();
    let resp = handle(get("/static/main.css"), &state_for(&db)).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/css; charset=utf-8"
    );
    let css = body_string(resp);
    assert!(css.contains(".badge"));
    assert!(css.contains(".bg-blue-100"));
    assert!(css.contains(".bar-fill"));

    let page = body_string(handle(get("/dashboard"), &state_for(&db)).unwrap());
    assert!(page.contains(r#"href="/static/main.css""#));
}
