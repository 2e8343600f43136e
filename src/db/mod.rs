pub mod campaigns;
pub mod changes;
pub mod connection;
pub mod leads;
pub mod social_leads;

pub use connection::{init_db, Database};

/// Decode a JSON array column. NULL or malformed text reads as empty.
pub(crate) fn decode_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub(crate) fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
