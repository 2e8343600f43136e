use maud::{html, Markup, PreEscaped};

use crate::outreach::status::{find_status, status_label, status_style, Channel};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Big-number tile on the dashboard and outreach pages.
pub fn stat_card(label: &str, value: impl std::fmt::Display, hint: Option<&str>) -> Markup {
    html! {
        div class="card stat" {
            p class="stat-label" { (label) }
            p class="stat-value" { (value.to_string()) }
            @if let Some(hint) = hint {
                p class="stat-hint" { (hint) }
            }
        }
    }
}

pub fn status_badge(status: Option<&str>, channel: Channel) -> Markup {
    html! {
        span class={ "badge " (status_style(status, channel)) } { (status_label(status, channel)) }
    }
}

/// Status select posting to `action`. The current value is preselected.
pub fn status_form(action: &str, current: Option<&str>, channel: Channel) -> Markup {
    let current = find_status(current, channel).map(|o| o.value).unwrap_or("new");
    html! {
        form method="post" action=(action) class="status-form" {
            label for="status" class="sr-only" { "Status" }
            select name="status" id="status" {
                @for opt in channel.options() {
                    option value=(opt.value) selected[opt.value == current] { (opt.label) }
                }
            }
            button type="submit" class="btn" { "Update status" }
        }
    }
}

/// Horizontal bar for chart-like summaries. `percent` is clamped to 0..=100.
pub fn bar(label: &str, count: usize, percent: u32, color: Option<&str>) -> Markup {
    let width = percent.min(100);
    let color = color.unwrap_or("#524ed2");
    html! {
        div class="bar-row" {
            span class="bar-label" { (label) }
            div class="bar-track" {
                div class="bar-fill" style=(format!("width: {width}%; background: {color};")) {}
            }
            span class="bar-count" { (count) }
        }
    }
}

pub fn notice(kind: &str, message: &str) -> Markup {
    html! {
        div class={ "notice notice-" (kind) } role="status" { (message) }
    }
}

pub fn empty_state(message: &str) -> Markup {
    html! {
        p class="empty" { (message) }
    }
}

/// Read-only message block with a button that copies it to the clipboard.
pub fn copy_block(id: &str, title: &str, subjects: &[String], text: &str) -> Markup {
    html! {
        section class="card message" {
            div class="message-head" {
                h3 { (title) }
                button
                    type="button"
                    class="btn copy"
                    data-copy-target=(id)
                    onclick=(PreEscaped(COPY_JS))
                { "Copy" }
            }
            @if !subjects.is_empty() {
                ul class="subjects" {
                    @for subject in subjects {
                        li { "Subject: " strong { (subject) } }
                    }
                }
            }
            textarea id=(id) readonly rows="12" { (text) }
        }
    }
}

const COPY_JS: &str = "navigator.clipboard.writeText(document.getElementById(this.dataset.copyTarget).value).then(() => { this.textContent = 'Copied'; setTimeout(() => this.textContent = 'Copy', 1500); })";

pub fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
