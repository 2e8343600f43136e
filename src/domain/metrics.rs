// src/domain/metrics.rs
//
// Summary numbers for the dashboard and outreach pages, computed over the
// in-memory record lists.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::campaign::{Campaign, CampaignStatus};
use super::lead::{Lead, LeadSource, ReplyIntent, SocialLead};
use crate::outreach::status::is_sent_status;

/// Whole-number percentage, 0 when the denominator is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    pub new: usize,
    pub contacted: usize,
    pub replied: usize,
    pub total: usize,
}

/// One bucket per day for the last `days` days (oldest first, today last).
pub fn leads_by_day(leads: &[Lead], now: DateTime<Utc>, days: i64) -> Vec<DayCount> {
    let today = now.date_naive();
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let day_leads: Vec<&Lead> = leads
                .iter()
                .filter(|l| l.created_at.date_naive() == date)
                .collect();
            DayCount {
                date,
                day: date.format("%a").to_string(),
                new: day_leads.iter().filter(|l| l.status_or_new() == "new").count(),
                contacted: day_leads
                    .iter()
                    .filter(|l| l.status_or_new() == "contacted")
                    .count(),
                replied: day_leads
                    .iter()
                    .filter(|l| l.status_or_new() == "replied")
                    .count(),
                total: day_leads.len(),
            }
        })
        .collect()
}

/// Lead counts keyed by raw source tag (missing tag -> "unknown"), sorted by tag.
pub fn leads_by_source(leads: &[Lead]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for lead in leads {
        let key = lead
            .lead_source
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| LeadSource::Unknown.as_str().to_string());
        *counts.entry(key).or_default() += 1;
    }
    counts.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    pub total_leads: usize,
    pub new_leads: usize,
    pub contacted_leads: usize,
    pub replied_leads: usize,
    pub leads_by_source: Vec<(String, usize)>,
    pub leads_by_day: Vec<DayCount>,
}

impl DashboardMetrics {
    pub fn compute(campaigns: &[Campaign], leads: &[Lead], now: DateTime<Utc>) -> Self {
        let count_status = |s: &str| leads.iter().filter(|l| l.status_or_new() == s).count();
        Self {
            total_campaigns: campaigns.len(),
            active_campaigns: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::Active)
                .count(),
            total_leads: leads.len(),
            new_leads: count_status("new"),
            contacted_leads: count_status("contacted"),
            replied_leads: count_status("replied"),
            leads_by_source: leads_by_source(leads),
            leads_by_day: leads_by_day(leads, now, 7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignPerformance {
    pub campaign_id: Option<i64>,
    pub name: String,
    pub total: usize,
    pub contacted: usize,
    pub replied: usize,
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutreachOverview {
    pub total_leads: usize,
    pub new_leads: usize,
    pub contacted_leads: usize,
    pub replied_leads: usize,
    pub response_rate: u32,
    pub by_day: Vec<DayCount>,
    /// Top five campaigns by reply rate.
    pub campaign_performance: Vec<CampaignPerformance>,
    /// Ten most recent leads with their campaign name.
    pub recent_activity: Vec<(Lead, String)>,
}

impl OutreachOverview {
    /// `leads` is expected newest first.
    pub fn compute(campaigns: &[Campaign], leads: &[Lead], now: DateTime<Utc>) -> Self {
        let names: HashMap<i64, &str> = campaigns
            .iter()
            .map(|c| (c.id, c.campaign_name.as_str()))
            .collect();
        let campaign_name = |id: Option<i64>| -> Option<String> {
            id.and_then(|id| names.get(&id).map(|n| n.to_string()))
        };

        let count_status = |s: &str| leads.iter().filter(|l| l.status_or_new() == s).count();
        let contacted_leads = count_status("contacted");
        let replied_leads = count_status("replied");

        // (total, contacted, replied) per campaign, in first-seen order.
        let mut order: Vec<Option<i64>> = Vec::new();
        let mut stats: HashMap<Option<i64>, (usize, usize, usize)> = HashMap::new();
        for lead in leads {
            let entry = stats.entry(lead.campaign_id).or_insert_with(|| {
                order.push(lead.campaign_id);
                (0, 0, 0)
            });
            entry.0 += 1;
            match lead.status_or_new() {
                "contacted" => entry.1 += 1,
                "replied" => entry.2 += 1,
                _ => {}
            }
        }

        let mut campaign_performance: Vec<CampaignPerformance> = order
            .into_iter()
            .map(|id| {
                let (total, contacted, replied) = stats[&id];
                CampaignPerformance {
                    campaign_id: id,
                    name: campaign_name(id).unwrap_or_else(|| match id {
                        Some(id) => format!("Campaign {id}"),
                        None => "No campaign".to_string(),
                    }),
                    total,
                    contacted,
                    replied,
                    rate: percent(replied, contacted),
                }
            })
            .collect();
        // Stable sort keeps first-seen order among equal rates.
        campaign_performance.sort_by(|a, b| b.rate.cmp(&a.rate));
        campaign_performance.truncate(5);

        let recent_activity = leads
            .iter()
            .take(10)
            .map(|l| {
                let name = campaign_name(l.campaign_id)
                    .unwrap_or_else(|| "Unknown Campaign".to_string());
                (l.clone(), name)
            })
            .collect();

        Self {
            total_leads: leads.len(),
            new_leads: count_status("new"),
            contacted_leads,
            replied_leads,
            response_rate: percent(replied_leads, contacted_leads),
            by_day: leads_by_day(leads, now, 7),
            campaign_performance,
            recent_activity,
        }
    }
}

/// Header numbers on the email outreach page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailOutreachStats {
    pub total: usize,
    pub new: usize,
    /// Any lead that has been sent at least one message in the sequence.
    pub contacted: usize,
    pub replied: usize,
    pub interested: usize,
    pub response_rate: u32,
    pub intents: Vec<(ReplyIntent, usize)>,
    pub sources: Vec<(String, usize)>,
}

impl EmailOutreachStats {
    pub fn compute(leads: &[Lead]) -> Self {
        let contacted = leads
            .iter()
            .filter(|l| l.outreach_status.as_deref().is_some_and(is_sent_status))
            .count();
        let replied = leads
            .iter()
            .filter(|l| l.outreach_status.as_deref() == Some("replied"))
            .count();

        let intents = ReplyIntent::ALL
            .iter()
            .map(|intent| (*intent, leads.iter().filter(|l| l.intent() == *intent).count()))
            .filter(|(_, n)| *n > 0)
            .collect();

        Self {
            total: leads.len(),
            new: leads.iter().filter(|l| l.status_or_new() == "new").count(),
            contacted,
            replied,
            interested: leads
                .iter()
                .filter(|l| {
                    l.intent() == ReplyIntent::Interested
                        || l.outreach_status.as_deref() == Some("interested")
                })
                .count(),
            response_rate: percent(replied, contacted),
            intents,
            sources: leads_by_source(leads),
        }
    }
}

/// Header numbers on the direct-message page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectMessageStats {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub replied: usize,
    pub interested: usize,
}

impl DirectMessageStats {
    pub fn compute(leads: &[SocialLead]) -> Self {
        let count = |s: &str| leads.iter().filter(|l| l.status == s).count();
        Self {
            total: leads.len(),
            new: count("new"),
            contacted: count("contacted"),
            replied: count("replied"),
            interested: count("interested"),
        }
    }
}
