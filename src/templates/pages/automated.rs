use crate::domain::feed::Collection;
use crate::domain::filters::{LeadFilter, ALL};
use crate::domain::lead::{format_source, Lead, LeadSource};
use crate::domain::metrics::EmailOutreachStats;
use crate::outreach::status::{Channel, EMAIL_STATUS_OPTIONS};
use crate::outreach::{follow_up_email, initial_email, EmailStage, LineFocus};
use crate::templates::components::{bar, empty_state, format_date};
use crate::templates::pages::crm::live_refresh;
use crate::templates::{copy_block, desktop_layout, stat_card, status_badge, status_form, Section};
use maud::{html, Markup};

pub struct AutomatedListVm<'a> {
    pub leads: Vec<&'a Lead>,
    pub stats: EmailOutreachStats,
    pub filter: &'a LeadFilter,
    pub cursor: i64,
}

fn or_all(value: &str) -> &str {
    if value.is_empty() {
        ALL
    } else {
        value
    }
}

fn lead_title(lead: &Lead) -> &str {
    lead.company_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(lead.full_name.as_deref())
        .unwrap_or("Unknown lead")
}

pub fn automated_list_page(vm: &AutomatedListVm) -> Markup {
    let status = or_all(&vm.filter.status);
    let source = or_all(&vm.filter.source);
    let s = &vm.stats;

    desktop_layout(
        "Automated Outreach",
        Section::Outreach,
        html! {
            p { a href="/outreach" { "← Outreach" } }
            h1 { "Automated Email Outreach" }

            div class="grid stats" {
                (stat_card("Leads", s.total, None))
                (stat_card("New", s.new, None))
                (stat_card("Contacted", s.contacted, Some("any message sent")))
                (stat_card("Replied", s.replied, None))
                (stat_card("Interested", s.interested, None))
                (stat_card("Response Rate", format!("{}%", s.response_rate), None))
            }

            @if !s.intents.is_empty() {
                section class="card" {
                    h3 { "Reply Intent" }
                    @for (intent, count) in &s.intents {
                        (bar(intent.label(), *count, crate::domain::metrics::percent(*count, s.total), Some(intent.color())))
                    }
                }
            }

            form method="get" action="/outreach/automated" class="filters" {
                input type="search" name="q" placeholder="Search name, company, email..." value=(vm.filter.search);
                select name="status" {
                    option value=(ALL) selected[status == ALL] { "All statuses" }
                    @for opt in EMAIL_STATUS_OPTIONS {
                        option value=(opt.value) selected[status == opt.value] { (opt.label) }
                    }
                }
                select name="source" {
                    option value=(ALL) selected[source == ALL] { "All sources" }
                    @for src in LeadSource::ALL {
                        option value=(src.as_str()) selected[source == src.as_str()] { (src.label()) }
                    }
                }
                button type="submit" class="btn" { "Filter" }
                @if vm.filter.is_active() {
                    a href="/outreach/automated" { "Clear" }
                }
            }

            section class="card" {
                @if vm.leads.is_empty() {
                    (empty_state("No leads match."))
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Lead" }
                                th { "Email" }
                                th { "Source" }
                                th { "Status" }
                                th { "Attempts" }
                                th { "Next follow-up" }
                                th { "" }
                            }
                        }
                        tbody {
                            @for lead in &vm.leads {
                                tr {
                                    td {
                                        strong { (lead_title(lead)) }
                                        @if let Some(name) = lead.full_name.as_deref().filter(|_| lead.company_name.is_some()) {
                                            br; span class="muted" { (name) }
                                        }
                                    }
                                    td { (lead.all_emails().first().copied().unwrap_or("-")) }
                                    td { (format_source(lead.lead_source.as_deref())) }
                                    td { (status_badge(lead.outreach_status.as_deref(), Channel::Email)) }
                                    td { (lead.attempts) }
                                    td { (format_date(lead.next_follow_up_at)) }
                                    td { a href=(format!("/outreach/automated/{}", lead.id)) { "Open sequence" } }
                                }
                            }
                        }
                    }
                }
            }

            (live_refresh(Collection::Leads, vm.cursor))
        },
    )
}

/// Full email sequence for one lead. `focus` overrides the detected line.
pub fn automated_detail_page(lead: &Lead, focus: Option<LineFocus>) -> Markup {
    let vars = lead.to_variables();
    let detected = lead.line_focus();
    let chosen = focus.unwrap_or(detected);
    let initial = initial_email(&vars, Some(chosen));

    desktop_layout(
        lead_title(lead),
        Section::Outreach,
        html! {
            p { a href="/outreach/automated" { "← All leads" } }

            section class="card" {
                div class="page-head" {
                    h1 { (lead_title(lead)) }
                    (status_badge(lead.outreach_status.as_deref(), Channel::Email))
                }
                dl class="facts" {
                    dt { "Contact" }
                    dd { (lead.full_name.as_deref().unwrap_or("-")) }
                    dt { "Emails" }
                    dd {
                        @for email in lead.all_emails() {
                            a href=(format!("mailto:{email}")) { (email) } " "
                        }
                    }
                    dt { "Source" }
                    dd { (format_source(lead.lead_source.as_deref())) }
                    dt { "Reply intent" }
                    dd { (lead.intent().label()) }
                    dt { "Attempts" }
                    dd { (lead.attempts) }
                    dt { "Last follow-up" }
                    dd { (format_date(lead.last_follow_up_at)) }
                    dt { "Next follow-up" }
                    dd { (format_date(lead.next_follow_up_at)) }
                }
                (status_form(&format!("/outreach/automated/{}/status", lead.id), lead.outreach_status.as_deref(), Channel::Email))
            }

            form method="get" action=(format!("/outreach/automated/{}", lead.id)) class="filters" {
                label for="line" { "Product line (detected: " (detected.label()) ")" }
                select name="line" id="line" onchange="this.form.submit()" {
                    @for line in [LineFocus::Mens, LineFocus::Womens, LineFocus::Family] {
                        option value=(line.as_str()) selected[line == chosen] { (line.label()) }
                    }
                }
            }

            (copy_block("initial", "Initial email", &initial.subject_options, &initial.body))
            @for stage in EmailStage::ALL {
                @let email = follow_up_email(&vars, stage);
                (copy_block(&format!("follow-up-{}", stage.number()), stage.title(), &email.subject_options, &email.body))
            }
        },
    )
}
