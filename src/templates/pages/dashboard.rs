use crate::domain::format_source;
use crate::domain::metrics::{percent, DashboardMetrics};
use crate::templates::components::{bar, empty_state};
use crate::templates::{desktop_layout, stat_card, Section};
use maud::{html, Markup};

pub fn dashboard_page(m: &DashboardMetrics) -> Markup {
    let busiest_day = m.leads_by_day.iter().map(|d| d.total).max().unwrap_or(0);

    desktop_layout(
        "Dashboard",
        Section::Dashboard,
        html! {
            h1 { "Dashboard" }

            div class="grid stats" {
                (stat_card("Campaigns", m.total_campaigns, Some(format!("{} active", m.active_campaigns).as_str())))
                (stat_card("Total Leads", m.total_leads, None))
                (stat_card("New", m.new_leads, None))
                (stat_card("Contacted", m.contacted_leads, None))
                (stat_card("Replied", m.replied_leads, None))
            }

            div class="grid two" {
                section class="card" {
                    h3 { "Leads by Source" }
                    @if m.leads_by_source.is_empty() {
                        (empty_state("No leads yet."))
                    }
                    @for (source, count) in &m.leads_by_source {
                        (bar(&format_source(Some(source)), *count, percent(*count, m.total_leads), None))
                    }
                }

                section class="card" {
                    h3 { "Last 7 Days" }
                    table {
                        thead {
                            tr { th { "Day" } th { "New" } th { "Contacted" } th { "Replied" } th { "" } }
                        }
                        tbody {
                            @for day in &m.leads_by_day {
                                tr {
                                    td { (day.day) }
                                    td { (day.new) }
                                    td { (day.contacted) }
                                    td { (day.replied) }
                                    td { (bar("", day.total, percent(day.total, busiest_day), None)) }
                                }
                            }
                        }
                    }
                }
            }

            section class="card" {
                h3 { "Quick links" }
                ul {
                    li { a href="/search" { "Start a new lead search" } }
                    li { a href="/outreach/automated" { "Work the email sequence" } }
                    li { a href="/outreach/manual" { "Send Instagram DMs" } }
                }
            }
        },
    )
}
