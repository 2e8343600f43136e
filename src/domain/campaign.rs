// src/domain/campaign.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
        }
    }

    /// Anything that isn't `active` is treated as paused.
    pub fn parse(raw: &str) -> Self {
        if raw == "active" {
            CampaignStatus::Active
        } else {
            CampaignStatus::Paused
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CampaignStatus::Active => CampaignStatus::Paused,
            CampaignStatus::Paused => CampaignStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub campaign_name: String,
    pub target_niche: Option<String>,
    pub sources: Vec<String>,
    pub regions: Vec<String>,
    pub keywords: Vec<String>,
    pub quantity: i64,
    pub status: CampaignStatus,
}

/// Platforms a search can run against: (value, label).
pub const PLATFORMS: &[(&str, &str)] = &[
    ("google_maps", "Google Maps"),
    ("instagram", "Instagram"),
    ("web_search", "Web Search"),
];

/// Regions offered by the search form, alphabetical.
pub const COUNTRIES: &[&str] = &[
    "Australia",
    "Brazil",
    "Canada",
    "France",
    "Germany",
    "India",
    "Japan",
    "Saudi Arabia",
    "Singapore",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
];

pub const DEFAULT_QUANTITY: i64 = 50;
pub const MAX_QUANTITY: i64 = 500;

/// A campaign as submitted from the search form, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub campaign_name: String,
    /// Raw comma-separated niche text, stored as entered.
    pub target_niche: String,
    pub sources: Vec<String>,
    pub regions: Vec<String>,
    pub keywords: Vec<String>,
    pub quantity: i64,
}

/// Split a comma-separated field, trimming and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl NewCampaign {
    /// Every field is required: a name, niches, keywords, at least one platform and one region.
    pub fn validate(
        campaign_name: &str,
        niches: &str,
        keywords: &str,
        sources: Vec<String>,
        regions: Vec<String>,
        quantity: Option<i64>,
    ) -> Result<Self, ServerError> {
        let campaign_name = campaign_name.trim();
        let keywords = split_list(keywords);

        if campaign_name.is_empty()
            || niches.trim().is_empty()
            || keywords.is_empty()
            || sources.is_empty()
            || regions.is_empty()
        {
            return Err(ServerError::BadRequest(
                "Please fill in all required fields.".into(),
            ));
        }

        if let Some(bad) = sources
            .iter()
            .find(|s| !PLATFORMS.iter().any(|(value, _)| *value == s.as_str()))
        {
            return Err(ServerError::BadRequest(format!("unknown platform: {bad}")));
        }

        let quantity = quantity.unwrap_or(DEFAULT_QUANTITY).clamp(1, MAX_QUANTITY);

        Ok(Self {
            campaign_name: campaign_name.to_string(),
            target_niche: niches.trim().to_string(),
            sources,
            regions,
            keywords,
            quantity,
        })
    }

    pub fn niches(&self) -> Vec<String> {
        split_list(&self.target_niche)
    }
}
