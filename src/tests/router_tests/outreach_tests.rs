// src/tests/router_tests/outreach_tests.rs

use super::{body_string, get, post_form, state_for};
use crate::db::leads::get_lead;
use crate::db::social_leads::get_social_lead;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    init_test_db, insert_lead, insert_social_lead, sample_lead, sample_social_lead,
};

#[test]
fn manual_detail_shows_generated_dm() {
    let db = init_test_db();
    let mut lead = sample_social_lead("s1");
    lead.username = Some("modest.threads".into());
    lead.biography = Some("Premium abayas & hijabs for sisters".into());
    insert_social_lead(&db, &lead);

    let resp = handle(get("/outreach/manual/s1"), &state_for(&db)).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Hi there,"));
    assert!(body.contains("abayas, jilbabs and women"));
    assert!(body.contains("retailers like modest.threads"));
    assert!(body.contains("WhatsApp follow-up 2"));
    assert!(body.contains("https://instagram.com/modest.threads"));
}

#[test]
fn manual_status_post_updates_and_redirects() {
    let db = init_test_db();
    insert_social_lead(&db, &sample_social_lead("s1"));

    let resp = handle(
        post_form("/outreach/manual/s1/status", "status=contacted"),
        &state_for(&db),
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/outreach/manual/s1");

    let stored = db.with_conn(|conn| get_social_lead(conn, "s1")).unwrap().unwrap();
    assert_eq!(stored.status, "contacted");
}

#[test]
fn manual_list_filters_by_status() {
    let db = init_test_db();
    let mut a = sample_social_lead("s1");
    a.username = Some("first.shop".into());
    let mut b = sample_social_lead("s2");
    b.username = Some("second.shop".into());
    b.status = "replied".into();
    insert_social_lead(&db, &a);
    insert_social_lead(&db, &b);

    let body = body_string(handle(get("/outreach/manual?status=replied"), &state_for(&db)).unwrap());
    assert!(body.contains("second.shop"));
    assert!(!body.contains("first.shop"));
}

#[test]
fn automated_status_update_stamps_follow_up() {
    let db = init_test_db();
    insert_lead(&db, &sample_lead("l1"));

    let resp = handle(
        post_form("/outreach/automated/l1/status", "status=follow_up_1"),
        &state_for(&db),
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let lead = db.with_conn(|conn| get_lead(conn, "l1")).unwrap().unwrap();
    assert_eq!(lead.outreach_status.as_deref(), Some("follow_up_1"));
    assert_eq!(lead.attempts, 1);
    assert!(lead.next_follow_up_at.is_some());
}

#[test]
fn invalid_status_is_a_bad_request() {
    let db = init_test_db();
    insert_lead(&db, &sample_lead("l1"));
    insert_social_lead(&db, &sample_social_lead("s1"));
    let state = state_for(&db);

    let err = handle(post_form("/outreach/automated/l1/status", "status=archived"), &state)
        .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(crate::responses::error_status(&err), 400);

    let err = handle(post_form("/outreach/manual/s1/status", "status=break_up"), &state)
        .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let err = handle(post_form("/outreach/manual/s1/status", ""), &state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let lead = db.with_conn(|conn| get_lead(conn, "l1")).unwrap().unwrap();
    assert_eq!(lead.outreach_status.as_deref(), Some("new"));
}

#[test]
fn automated_detail_renders_full_sequence() {
    let db = init_test_db();
    let mut lead = sample_lead("l1");
    lead.full_name = Some("Omar Said".into());
    lead.company_name = Some("Sunnah Style".into());
    lead.context = Some("thobes and jubbas".into());
    insert_lead(&db, &lead);
    let state = state_for(&db);

    let body = body_string(handle(get("/outreach/automated/l1"), &state).unwrap());
    assert!(body.contains("Hi Omar,"));
    assert!(body.contains("Initial email"));
    assert!(body.contains("Follow-up 1"));
    assert!(body.contains("Follow-up 2"));
    assert!(body.contains("Break-up"));
    assert!(body.contains(r#"<option value="mens" selected>"#));

    let body = body_string(handle(get("/outreach/automated/l1?line=womens"), &state).unwrap());
    assert!(body.contains(r#"<option value="womens" selected>"#));

    assert!(matches!(
        handle(get("/outreach/automated/ghost"), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn automated_list_searches_and_filters_source() {
    let db = init_test_db();
    let mut a = sample_lead("l1");
    a.company_name = Some("Noor Boutique".into());
    a.lead_source = Some("google_maps".into());
    let mut b = sample_lead("l2");
    b.company_name = Some("Kufi Corner".into());
    b.lead_source = Some("web_search".into());
    insert_lead(&db, &a);
    insert_lead(&db, &b);
    let state = state_for(&db);

    let body = body_string(handle(get("/outreach/automated?q=noor"), &state).unwrap());
    assert!(body.contains("Noor Boutique"));
    assert!(!body.contains("Kufi Corner"));

    let body = body_string(
        handle(get("/outreach/automated?source=web_search&status=all"), &state).unwrap(),
    );
    assert!(body.contains("Kufi Corner"));
    assert!(!body.contains("Noor Boutique"));
}

#[test]
fn outreach_overview_and_crm_render() {
    let db = init_test_db();
    let mut lead = sample_lead("l1");
    lead.company_name = Some("Hijab House".into());
    lead.emails = vec!["hello@hijab.house".into()];
    insert_lead(&db, &lead);
    let state = state_for(&db);

    let body = body_string(handle(get("/outreach"), &state).unwrap());
    assert!(body.contains("Campaign Performance"));
    assert!(body.contains("Hijab House"));

    let body = body_string(handle(get("/crm"), &state).unwrap());
    assert!(body.contains("Live Leads"));
    assert!(body.contains("mailto:hello@hijab.house"));

    let resp = handle(get("/crm/export"), &state).unwrap();
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}
