use crate::domain::campaign::{Campaign, CampaignStatus, PLATFORMS};
use crate::domain::lead::{format_source, Lead};
use crate::outreach::status::Channel;
use crate::templates::components::{empty_state, format_date, notice};
use crate::templates::{desktop_layout, status_badge, Section};
use maud::{html, Markup};

fn campaign_status_badge(status: CampaignStatus) -> Markup {
    let class = match status {
        CampaignStatus::Active => "badge bg-green-100 text-green-800 border-green-200",
        CampaignStatus::Paused => "badge bg-gray-100 text-gray-800 border-gray-200",
    };
    html! { span class=(class) { (status.as_str()) } }
}

fn toggle_form(campaign: &Campaign) -> Markup {
    let label = match campaign.status {
        CampaignStatus::Active => "Pause",
        CampaignStatus::Paused => "Resume",
    };
    html! {
        form method="post" action=(format!("/campaigns/{}/toggle", campaign.id)) class="inline" {
            button type="submit" class="btn" { (label) }
        }
    }
}

fn platform_label(value: &str) -> &str {
    PLATFORMS
        .iter()
        .find(|(v, _)| *v == value)
        .map_or(value, |(_, label)| *label)
}

/// `flash` is an optional (kind, message) notice shown above the table.
pub fn campaigns_page(campaigns: &[Campaign], flash: Option<(&str, &str)>) -> Markup {
    desktop_layout(
        "Campaigns",
        Section::Campaigns,
        html! {
            div class="page-head" {
                h1 { "Outreach Campaigns" }
                a href="/search" class="btn primary" { "New Campaign" }
            }

            @if let Some((kind, message)) = flash {
                (notice(kind, message))
            }

            section class="card" {
                h3 { "All Campaigns" }
                @if campaigns.is_empty() {
                    (empty_state("No campaigns yet. Start one from the search page."))
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Campaign Name" }
                                th { "Status" }
                                th { "Regions" }
                                th { "Quantity" }
                                th { "Created" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            @for c in campaigns {
                                tr {
                                    td { a href=(format!("/campaigns/{}", c.id)) { (c.campaign_name) } }
                                    td { (campaign_status_badge(c.status)) }
                                    td { (c.regions.join(", ")) }
                                    td { (c.quantity) }
                                    td { (format_date(Some(c.created_at))) }
                                    td { (toggle_form(c)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn campaign_detail_page(campaign: &Campaign, leads: &[Lead]) -> Markup {
    desktop_layout(
        &campaign.campaign_name,
        Section::Campaigns,
        html! {
            p { a href="/campaigns" { "← All campaigns" } }

            section class="card" {
                div class="page-head" {
                    h1 { (campaign.campaign_name) }
                    (campaign_status_badge(campaign.status))
                    (toggle_form(campaign))
                }
                dl class="facts" {
                    dt { "Niche" }
                    dd { (campaign.target_niche.as_deref().unwrap_or("-")) }
                    dt { "Keywords" }
                    dd { (campaign.keywords.join(", ")) }
                    dt { "Platforms" }
                    dd {
                        @for (i, s) in campaign.sources.iter().enumerate() {
                            @if i > 0 { ", " }
                            (platform_label(s))
                        }
                    }
                    dt { "Regions" }
                    dd { (campaign.regions.join(", ")) }
                    dt { "Target quantity" }
                    dd { (campaign.quantity) }
                    dt { "Created" }
                    dd { (format_date(Some(campaign.created_at))) }
                }
            }

            section class="card" {
                h3 { "Leads (" (leads.len()) ")" }
                @if leads.is_empty() {
                    (empty_state("No leads found for this campaign yet."))
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Name" }
                                th { "Company" }
                                th { "Email" }
                                th { "Source" }
                                th { "Status" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            @for lead in leads {
                                tr {
                                    td { (lead.full_name.as_deref().unwrap_or("-")) }
                                    td { (lead.company_name.as_deref().unwrap_or("-")) }
                                    td { (lead.all_emails().first().copied().unwrap_or("-")) }
                                    td { (format_source(lead.lead_source.as_deref())) }
                                    td { (status_badge(lead.outreach_status.as_deref(), Channel::Email)) }
                                    td { a href=(format!("/outreach/automated/{}", lead.id)) { "Open" } }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
