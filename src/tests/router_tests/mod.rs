mod api_tests;
mod campaign_tests;
mod dashboard_tests;
mod outreach_tests;

use crate::config::AppConfig;
use crate::db::connection::Database;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;

/// State with the webhook disabled.
pub fn state_for(db: &Database) -> crate::router::AppState {
    crate::router::AppState::new(db.clone(), &AppConfig::default())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
