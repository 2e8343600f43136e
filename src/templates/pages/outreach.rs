use crate::domain::metrics::{percent, DirectMessageStats, OutreachOverview};
use crate::outreach::status::Channel;
use crate::templates::components::{bar, empty_state, format_date};
use crate::templates::{desktop_layout, stat_card, status_badge, Section};
use maud::{html, Markup};

pub fn outreach_page(o: &OutreachOverview, dm: &DirectMessageStats) -> Markup {
    let busiest_day = o.by_day.iter().map(|d| d.total).max().unwrap_or(0);

    desktop_layout(
        "Outreach",
        Section::Outreach,
        html! {
            h1 { "Outreach" }

            div class="grid two" {
                a href="/outreach/automated" class="card link" {
                    h3 { "Automated email" }
                    p { "Initial email plus three follow-ups, generated per lead." }
                }
                a href="/outreach/manual" class="card link" {
                    h3 { "Manual DM" }
                    p { (dm.total) " Instagram profiles, " (dm.new) " not yet contacted." }
                }
            }

            div class="grid stats" {
                (stat_card("Total Leads", o.total_leads, None))
                (stat_card("Contacted", o.contacted_leads, None))
                (stat_card("Replied", o.replied_leads, None))
                (stat_card("Response Rate", format!("{}%", o.response_rate), Some("replied / contacted")))
            }

            div class="grid two" {
                section class="card" {
                    h3 { "Outreach by Day" }
                    @for day in &o.by_day {
                        (bar(&day.day, day.total, percent(day.total, busiest_day), None))
                    }
                }

                section class="card" {
                    h3 { "Campaign Performance" }
                    @if o.campaign_performance.is_empty() {
                        (empty_state("No campaign data yet."))
                    } @else {
                        table {
                            thead {
                                tr { th { "Campaign" } th { "Leads" } th { "Contacted" } th { "Replied" } th { "Rate" } }
                            }
                            tbody {
                                @for c in &o.campaign_performance {
                                    tr {
                                        td {
                                            @if let Some(id) = c.campaign_id {
                                                a href=(format!("/campaigns/{id}")) { (c.name) }
                                            } @else {
                                                (c.name)
                                            }
                                        }
                                        td { (c.total) }
                                        td { (c.contacted) }
                                        td { (c.replied) }
                                        td { (c.rate) "%" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section class="card" {
                h3 { "Recent Activity" }
                @if o.recent_activity.is_empty() {
                    (empty_state("Nothing yet."))
                }
                ul class="activity" {
                    @for (lead, campaign_name) in &o.recent_activity {
                        li {
                            a href=(format!("/outreach/automated/{}", lead.id)) {
                                (lead.company_name.as_deref().or(lead.full_name.as_deref()).unwrap_or("Unknown lead"))
                            }
                            " · " (campaign_name) " · "
                            (status_badge(lead.outreach_status.as_deref(), Channel::Email))
                            span class="muted" { " " (format_date(Some(lead.created_at))) }
                        }
                    }
                }
            }
        },
    )
}
