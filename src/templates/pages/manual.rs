use crate::domain::feed::Collection;
use crate::domain::filters::{SocialLeadFilter, ALL};
use crate::domain::lead::SocialLead;
use crate::domain::metrics::DirectMessageStats;
use crate::outreach::status::{Channel, DIRECT_MESSAGE_STATUS_OPTIONS};
use crate::outreach::{instagram_dm, whatsapp_follow_up, DmStage};
use crate::templates::components::{empty_state, format_date};
use crate::templates::pages::crm::live_refresh;
use crate::templates::{copy_block, desktop_layout, stat_card, status_badge, status_form, Section};
use maud::{html, Markup};

pub struct ManualListVm<'a> {
    pub leads: Vec<&'a SocialLead>,
    pub stats: DirectMessageStats,
    pub filter: &'a SocialLeadFilter,
    pub cursor: i64,
}

fn display_name(lead: &SocialLead) -> &str {
    lead.fullname
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(lead.username.as_deref())
        .unwrap_or("Unknown profile")
}

pub fn manual_list_page(vm: &ManualListVm) -> Markup {
    let current_status = if vm.filter.status.is_empty() { ALL } else { vm.filter.status.as_str() };

    desktop_layout(
        "Manual Outreach",
        Section::Outreach,
        html! {
            p { a href="/outreach" { "← Outreach" } }
            h1 { "Manual DM Outreach" }

            div class="grid stats" {
                (stat_card("Profiles", vm.stats.total, None))
                (stat_card("New", vm.stats.new, None))
                (stat_card("Contacted", vm.stats.contacted, None))
                (stat_card("Replied", vm.stats.replied, None))
                (stat_card("Interested", vm.stats.interested, None))
            }

            form method="get" action="/outreach/manual" class="filters" {
                input type="search" name="q" placeholder="Search handle, name, bio..." value=(vm.filter.search);
                select name="status" {
                    option value=(ALL) selected[current_status == ALL] { "All statuses" }
                    @for opt in DIRECT_MESSAGE_STATUS_OPTIONS {
                        option value=(opt.value) selected[current_status == opt.value] { (opt.label) }
                    }
                }
                button type="submit" class="btn" { "Filter" }
            }

            section class="card" {
                @if vm.leads.is_empty() {
                    (empty_state("No profiles match."))
                } @else {
                    table {
                        thead {
                            tr { th { "Profile" } th { "Search term" } th { "Line" } th { "Status" } th { "Found" } th { "" } }
                        }
                        tbody {
                            @for lead in &vm.leads {
                                tr {
                                    td {
                                        strong { (display_name(lead)) }
                                        @if let Some(handle) = lead.username.as_deref() {
                                            br; span class="muted" { "@" (handle.trim_start_matches('@')) }
                                        }
                                    }
                                    td { (lead.search_term.as_deref().unwrap_or("-")) }
                                    td { (lead.line_focus().label()) }
                                    td { (status_badge(Some(&lead.status), Channel::DirectMessage)) }
                                    td { (format_date(Some(lead.created_at))) }
                                    td { a href=(format!("/outreach/manual/{}", lead.id)) { "Write DM" } }
                                }
                            }
                        }
                    }
                }
            }

            (live_refresh(Collection::InstagramLeads, vm.cursor))
        },
    )
}

pub fn manual_detail_page(lead: &SocialLead) -> Markup {
    let vars = lead.to_variables();
    let dm = instagram_dm(&vars);
    let first = whatsapp_follow_up(&vars, DmStage::FollowUp1);
    let second = whatsapp_follow_up(&vars, DmStage::FollowUp2);

    desktop_layout(
        display_name(lead),
        Section::Outreach,
        html! {
            p { a href="/outreach/manual" { "← All profiles" } }

            section class="card" {
                div class="page-head" {
                    h1 { (display_name(lead)) }
                    (status_badge(Some(&lead.status), Channel::DirectMessage))
                }
                @if let Some(bio) = lead.biography.as_deref() {
                    p class="bio" { (bio) }
                }
                p {
                    "Detected line: " strong { (lead.line_focus().label()) }
                    @if let Some(url) = lead.profile_url() {
                        " · " a href=(url) target="_blank" rel="noopener" { "Open profile" }
                    }
                }
                (status_form(&format!("/outreach/manual/{}/status", lead.id), Some(&lead.status), Channel::DirectMessage))
            }

            (copy_block("dm", "Instagram DM", &[], &dm))
            (copy_block("follow-up-1", "WhatsApp follow-up 1", &[], &first))
            (copy_block("follow-up-2", "WhatsApp follow-up 2", &[], &second))
        },
    )
}
