// src/domain/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::outreach::{detect_line_focus, LeadVariables, LineFocus};

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadSource {
    /// Social profile (Instagram).
    Instagram,
    /// Maps listing.
    GoogleMaps,
    WebSearch,
    Unknown,
}

impl LeadSource {
    pub const ALL: [LeadSource; 3] = [
        LeadSource::GoogleMaps,
        LeadSource::Instagram,
        LeadSource::WebSearch,
    ];

    /// Exact tag match, the same comparison the source filter makes.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("instagram") => LeadSource::Instagram,
            Some("google_maps") => LeadSource::GoogleMaps,
            Some("web_search") => LeadSource::WebSearch,
            _ => LeadSource::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Instagram => "instagram",
            LeadSource::GoogleMaps => "google_maps",
            LeadSource::WebSearch => "web_search",
            LeadSource::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadSource::Instagram => "Instagram",
            LeadSource::GoogleMaps => "Google Maps",
            LeadSource::WebSearch => "Web Search",
            LeadSource::Unknown => "Unknown",
        }
    }
}

/// Title-case an unrecognised tag for display: `"trade_show"` -> `"Trade Show"`.
pub fn format_source(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return LeadSource::Unknown.label().to_string();
    };
    match LeadSource::parse(Some(raw)) {
        LeadSource::Unknown => title_case(&raw.replace('_', " ")),
        known => known.label().to_string(),
    }
}

pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyIntent {
    Interested,
    Maybe,
    NotInterested,
    Unknown,
}

impl ReplyIntent {
    pub const ALL: [ReplyIntent; 4] = [
        ReplyIntent::Interested,
        ReplyIntent::Maybe,
        ReplyIntent::NotInterested,
        ReplyIntent::Unknown,
    ];

    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("interested") => ReplyIntent::Interested,
            Some("maybe") => ReplyIntent::Maybe,
            Some("not_interested") => ReplyIntent::NotInterested,
            _ => ReplyIntent::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReplyIntent::Interested => "Interested",
            ReplyIntent::Maybe => "Maybe",
            ReplyIntent::NotInterested => "Not Interested",
            ReplyIntent::Unknown => "Unknown",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ReplyIntent::Interested => "#10B981",
            ReplyIntent::Maybe => "#F59E0B",
            ReplyIntent::NotInterested => "#EF4444",
            ReplyIntent::Unknown => "#6B7280",
        }
    }
}

/// A lead from the maps / web pipelines, worked through the email sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub campaign_id: Option<i64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub context: Option<String>,
    pub lead_source: Option<String>,
    pub outreach_status: Option<String>,
    pub reply_intent: Option<String>,
    pub last_follow_up_at: Option<DateTime<Utc>>,
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub raw_data: Option<Value>,
    pub gender: Option<String>,
    pub attempts: i64,
}

impl Lead {
    pub fn intent(&self) -> ReplyIntent {
        ReplyIntent::parse(self.reply_intent.as_deref())
    }

    /// Every known address: the `emails` list when populated, else the single `email`.
    pub fn all_emails(&self) -> Vec<&str> {
        if !self.emails.is_empty() {
            return self.emails.iter().map(String::as_str).collect();
        }
        self.email.as_deref().into_iter().collect()
    }

    /// Missing status reads as `new`.
    pub fn status_or_new(&self) -> &str {
        self.outreach_status.as_deref().unwrap_or("new")
    }

    /// Line detected from the context, or the company name when there is none.
    pub fn line_focus(&self) -> LineFocus {
        let text = self
            .context
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.company_name.as_deref());
        detect_line_focus(text)
    }

    fn raw_str(&self, key: &str) -> Option<String> {
        self.raw_data
            .as_ref()
            .and_then(|raw| raw.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Project onto the template variables used by the email sequence.
    /// City and country come from the ingestion payload when it carries them.
    pub fn to_variables(&self) -> LeadVariables {
        LeadVariables {
            contact_first_name: self.full_name.clone(),
            business_name: self.company_name.clone(),
            city: self.raw_str("city"),
            country: self.raw_str("country"),
            product_focus: self.context.clone(),
            ..Default::default()
        }
    }
}

/// A profile from the inbound Instagram feed, worked by direct message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLead {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub campaign_id: Option<String>,
    pub search_term: Option<String>,
    pub username: Option<String>,
    pub url: Option<String>,
    pub fullname: Option<String>,
    pub biography: Option<String>,
    pub status: String,
}

impl SocialLead {
    pub fn line_focus(&self) -> LineFocus {
        detect_line_focus(self.biography.as_deref())
    }

    /// Profile link: the stored URL, else one built from the handle.
    pub fn profile_url(&self) -> Option<String> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("https://instagram.com/{}", u.replace('@', "")))
    }

    pub fn to_variables(&self) -> LeadVariables {
        LeadVariables {
            fullname: self.fullname.clone(),
            username: self.username.clone(),
            biography: self.biography.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lead(id: &str) -> Lead {
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
            outreach_status: None,
            reply_intent: None,
            last_follow_up_at: None,
            next_follow_up_at: None,
            raw_data: None,
            gender: None,
            attempts: 0,
        }
    }

    #[test]
    fn source_parsing_matches_exact_tags() {
        assert_eq!(LeadSource::parse(Some("google_maps")), LeadSource::GoogleMaps);
        assert_eq!(LeadSource::parse(Some("instagram")), LeadSource::Instagram);
        assert_eq!(LeadSource::parse(Some("web_search")), LeadSource::WebSearch);
        assert_eq!(LeadSource::parse(Some("maps")), LeadSource::Unknown);
        assert_eq!(LeadSource::parse(Some("Instagram")), LeadSource::Unknown);
        assert_eq!(LeadSource::parse(Some("linkedin")), LeadSource::Unknown);
        assert_eq!(LeadSource::parse(None), LeadSource::Unknown);
    }

    #[test]
    fn format_source_title_cases_unknown_tags() {
        assert_eq!(format_source(Some("google_maps")), "Google Maps");
        assert_eq!(format_source(Some("trade_show")), "Trade Show");
        assert_eq!(format_source(Some("maps")), "Maps");
        assert_eq!(format_source(None), "Unknown");
    }

    #[test]
    fn intent_defaults_to_unknown() {
        assert_eq!(ReplyIntent::parse(Some("maybe")), ReplyIntent::Maybe);
        assert_eq!(ReplyIntent::parse(Some("angry")), ReplyIntent::Unknown);
        assert_eq!(ReplyIntent::parse(None), ReplyIntent::Unknown);
    }

    #[test]
    fn emails_list_wins_over_single_email() {
        let mut l = lead("a");
        l.email = Some("one@shop.com".into());
        assert_eq!(l.all_emails(), vec!["one@shop.com"]);

        l.emails = vec!["two@shop.com".into(), "three@shop.com".into()];
        assert_eq!(l.all_emails(), vec!["two@shop.com", "three@shop.com"]);

        assert!(lead("b").all_emails().is_empty());
    }

    #[test]
    fn variables_pick_city_and_country_from_raw_data() {
        let mut l = lead("a");
        l.full_name = Some("Omar Said".into());
        l.company_name = Some("Sunnah Style".into());
        l.context = Some("thobes and kufis".into());
        l.raw_data = Some(json!({ "city": "Birmingham", "country": "", "rating": 4.8 }));

        let vars = l.to_variables();
        assert_eq!(vars.contact_first_name.as_deref(), Some("Omar Said"));
        assert_eq!(vars.business_name.as_deref(), Some("Sunnah Style"));
        assert_eq!(vars.city.as_deref(), Some("Birmingham"));
        assert_eq!(vars.country, None);
        assert_eq!(vars.product_focus.as_deref(), Some("thobes and kufis"));
    }

    #[test]
    fn line_focus_falls_back_to_company_name() {
        let mut l = lead("a");
        l.company_name = Some("Abaya Avenue".into());
        assert_eq!(l.line_focus(), LineFocus::Womens);

        l.context = Some("Thobe specialists".into());
        assert_eq!(l.line_focus(), LineFocus::Mens);
    }

    #[test]
    fn social_profile_url_from_handle() {
        let social = SocialLead {
            id: "s1".into(),
            created_at: Utc::now(),
            campaign_id: None,
            search_term: None,
            username: Some("@modest.co".into()),
            url: None,
            fullname: None,
            biography: None,
            status: "new".into(),
        };
        assert_eq!(
            social.profile_url().as_deref(),
            Some("https://instagram.com/modest.co")
        );
    }
}
