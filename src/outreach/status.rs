// src/outreach/status.rs

use chrono::{DateTime, Duration, Utc};

/// Outreach channel. Each has its own fixed list of statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Instagram / WhatsApp, worked by hand.
    DirectMessage,
    /// The templated email sequence.
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub style: &'static str,
}

const fn opt(value: &'static str, label: &'static str, style: &'static str) -> StatusOption {
    StatusOption {
        value,
        label,
        style,
    }
}

pub const DEFAULT_LABEL: &str = "New";
pub const DEFAULT_STYLE: &str = "bg-blue-100 text-blue-800 border-blue-200";

pub const DIRECT_MESSAGE_STATUS_OPTIONS: &[StatusOption] = &[
    opt("new", "New", "bg-blue-100 text-blue-800 border-blue-200"),
    opt("contacted", "Contacted", "bg-yellow-100 text-yellow-800 border-yellow-200"),
    opt("replied", "Replied", "bg-green-100 text-green-800 border-green-200"),
    opt("interested", "Interested", "bg-emerald-100 text-emerald-800 border-emerald-200"),
    opt("not_interested", "Not Interested", "bg-gray-100 text-gray-800 border-gray-200"),
    opt("closed", "Closed", "bg-zinc-100 text-zinc-600 border-zinc-200"),
];

pub const EMAIL_STATUS_OPTIONS: &[StatusOption] = &[
    opt("new", "New", "bg-blue-100 text-blue-800 border-blue-200"),
    opt("contacted", "Contacted", "bg-yellow-100 text-yellow-800 border-yellow-200"),
    opt("follow_up_1", "Follow-up 1", "bg-orange-100 text-orange-800 border-orange-200"),
    opt("follow_up_2", "Follow-up 2", "bg-amber-100 text-amber-800 border-amber-200"),
    opt("break_up", "Break-up Sent", "bg-red-100 text-red-800 border-red-200"),
    opt("replied", "Replied", "bg-green-100 text-green-800 border-green-200"),
    opt("interested", "Interested", "bg-emerald-100 text-emerald-800 border-emerald-200"),
    opt("not_interested", "Not Interested", "bg-gray-100 text-gray-800 border-gray-200"),
    opt("closed", "Closed", "bg-zinc-100 text-zinc-600 border-zinc-200"),
];

/// Email statuses that mean a message went out.
pub const SENT_STATUSES: &[&str] = &["contacted", "follow_up_1", "follow_up_2", "break_up"];

impl Channel {
    pub fn options(self) -> &'static [StatusOption] {
        match self {
            Channel::DirectMessage => DIRECT_MESSAGE_STATUS_OPTIONS,
            Channel::Email => EMAIL_STATUS_OPTIONS,
        }
    }
}

pub fn find_status(status: Option<&str>, channel: Channel) -> Option<&'static StatusOption> {
    let status = status?;
    channel.options().iter().find(|o| o.value == status)
}

pub fn status_label(status: Option<&str>, channel: Channel) -> &'static str {
    find_status(status, channel).map_or(DEFAULT_LABEL, |o| o.label)
}

pub fn status_style(status: Option<&str>, channel: Channel) -> &'static str {
    find_status(status, channel).map_or(DEFAULT_STYLE, |o| o.style)
}

pub fn is_valid_status(status: &str, channel: Channel) -> bool {
    find_status(Some(status), channel).is_some()
}

pub fn is_sent_status(status: &str) -> bool {
    SENT_STATUSES.contains(&status)
}

/// Follow-up dates stamped when a lead moves into a sending stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpSchedule {
    pub last_follow_up_at: DateTime<Utc>,
    pub next_follow_up_at: DateTime<Utc>,
}

impl FollowUpSchedule {
    /// `None` for statuses that do not schedule another touch.
    pub fn for_status(status: &str, now: DateTime<Utc>) -> Option<Self> {
        let wait_days = match status {
            "contacted" => 3,
            "follow_up_1" => 4,
            "follow_up_2" => 5,
            _ => return None,
        };
        Some(Self {
            last_follow_up_at: now,
            next_follow_up_at: now + Duration::days(wait_days),
        })
    }
}
