// src/webhook.rs

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::domain::campaign::Campaign;
use crate::errors::ServerError;

/// Body posted to the automation endpoint when a campaign is created.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload<'a> {
    pub campaign_id: i64,
    pub campaign_name: &'a str,
    pub niches: Vec<String>,
    pub keywords: &'a [String],
    pub platforms: &'a [String],
    pub countries: &'a [String],
    pub quantity: i64,
}

impl<'a> CampaignPayload<'a> {
    pub fn from_campaign(campaign: &'a Campaign) -> Self {
        let niches = campaign
            .target_niche
            .as_deref()
            .map(crate::domain::campaign::split_list)
            .unwrap_or_default();
        Self {
            campaign_id: campaign.id,
            campaign_name: &campaign.campaign_name,
            niches,
            keywords: &campaign.keywords,
            platforms: &campaign.sources,
            countries: &campaign.regions,
            quantity: campaign.quantity,
        }
    }
}

pub struct CampaignWebhook {
    url: String,
    client: Client,
}

impl CampaignWebhook {
    pub fn new(url: String, timeout: Duration) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Webhook(format!("client setup failed: {e}")))?;
        Ok(Self { url, client })
    }

    /// POST the campaign. Non-2xx responses count as failures.
    pub fn notify(&self, campaign: &Campaign) -> Result<(), ServerError> {
        let payload = CampaignPayload::from_campaign(campaign);

        let res = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|e| ServerError::Webhook(format!("request failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().unwrap_or_default();
            return Err(ServerError::Webhook(format!("{status}: {text}")));
        }

        tracing::info!(campaign_id = campaign.id, url = %self.url, "campaign webhook delivered");
        Ok(())
    }
}

/// Fire the webhook if one is configured. Returns a warning for the operator
/// when delivery fails; the campaign itself is already saved.
pub fn dispatch(url: Option<&str>, timeout: Duration, campaign: &Campaign) -> Option<String> {
    let Some(url) = url else {
        tracing::info!(campaign_id = campaign.id, "no webhook configured, skipping dispatch");
        return None;
    };

    let result = CampaignWebhook::new(url.to_string(), timeout).and_then(|hook| hook.notify(campaign));
    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(campaign_id = campaign.id, error = %e, "campaign webhook failed");
            Some(format!(
                "Campaign saved, but the automation webhook failed: {e}"
            ))
        }
    }
}
