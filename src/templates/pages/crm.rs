use crate::domain::lead::{format_source, Lead};
use crate::domain::feed::Collection;
use crate::outreach::status::Channel;
use crate::templates::components::{empty_state, format_date};
use crate::templates::{desktop_layout, status_badge, Section};
use maud::{html, Markup, PreEscaped};

/// Polls the change feed and reloads the page once something changed.
pub fn live_refresh(collection: Collection, cursor: i64) -> Markup {
    let script = format!(
        r#"(function () {{
  let cursor = {cursor};
  setInterval(async () => {{
    const res = await fetch("/api/changes/{collection}?since=" + cursor);
    if (!res.ok) return;
    const feed = await res.json();
    if (feed.events.length > 0) window.location.reload();
    cursor = feed.cursor;
  }}, 5000);
}})();"#,
        collection = collection.as_str(),
    );
    html! {
        script { (PreEscaped(script)) }
    }
}

pub fn crm_page(leads: &[Lead], cursor: i64) -> Markup {
    desktop_layout(
        "CRM",
        Section::Crm,
        html! {
            div class="page-head" {
                h1 { "Live Leads" }
                span class="muted" { (leads.len()) " leads" }
                a href="/crm/export" class="btn" { "Export XLSX" }
            }

            section class="card" {
                @if leads.is_empty() {
                    (empty_state("No leads yet. They appear here as campaigns find them."))
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Name" }
                                th { "Company" }
                                th { "Emails" }
                                th { "Phone" }
                                th { "Source" }
                                th { "Status" }
                                th { "Found" }
                            }
                        }
                        tbody {
                            @for lead in leads {
                                tr {
                                    td {
                                        a href=(format!("/outreach/automated/{}", lead.id)) {
                                            (lead.full_name.as_deref().unwrap_or("Unknown"))
                                        }
                                    }
                                    td {
                                        @if let Some(site) = lead.website.as_deref().filter(|s| !s.is_empty()) {
                                            a href=(site) target="_blank" rel="noopener" {
                                                (lead.company_name.as_deref().unwrap_or(site))
                                            }
                                        } @else {
                                            (lead.company_name.as_deref().unwrap_or("-"))
                                        }
                                    }
                                    td {
                                        @for email in lead.all_emails() {
                                            a href=(format!("mailto:{email}")) { (email) } br;
                                        }
                                    }
                                    td { (lead.phone.as_deref().unwrap_or("-")) }
                                    td { (format_source(lead.lead_source.as_deref())) }
                                    td { (status_badge(lead.outreach_status.as_deref(), Channel::Email)) }
                                    td { (format_date(Some(lead.created_at))) }
                                }
                            }
                        }
                    }
                }
            }

            (live_refresh(Collection::Leads, cursor))
        },
    )
}
