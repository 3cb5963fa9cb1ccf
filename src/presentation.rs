//! Total mappings from backend states to display descriptors.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard_client::{AgentStatus, ChangeDirection, SlaStatus};
use crate::stream::{ConnectionPhase, StreamStatus};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl StatusBadge {
    fn new(label: impl Into<String>, variant: BadgeVariant) -> Self {
        Self {
            label: label.into(),
            variant,
        }
    }
}

/// Unrecognised statuses keep their raw label with the outline style.
pub fn agent_status_badge(status: &AgentStatus) -> StatusBadge {
    match status {
        AgentStatus::Available => StatusBadge::new("Available", BadgeVariant::Default),
        AgentStatus::OnCall => StatusBadge::new("On Call", BadgeVariant::Secondary),
        AgentStatus::Away => StatusBadge::new("Away", BadgeVariant::Outline),
        AgentStatus::Busy => StatusBadge::new("Busy", BadgeVariant::Destructive),
        AgentStatus::Unknown(raw) if raw.trim().is_empty() => {
            StatusBadge::new("Unknown", BadgeVariant::Outline)
        }
        AgentStatus::Unknown(raw) => StatusBadge::new(raw.trim(), BadgeVariant::Outline),
    }
}

pub fn sla_badge(status: Option<SlaStatus>) -> StatusBadge {
    match status {
        Some(SlaStatus::Ok) => StatusBadge::new("OK", BadgeVariant::Default),
        Some(SlaStatus::Warning) => StatusBadge::new("Warning", BadgeVariant::Secondary),
        Some(SlaStatus::Critical) => StatusBadge::new("Critical", BadgeVariant::Destructive),
        Some(SlaStatus::Unknown) | None => StatusBadge::new("Unknown", BadgeVariant::Outline),
    }
}

/// Connection pill shown in the header of every live surface.
pub fn connection_indicator(status: &StreamStatus) -> StatusBadge {
    match status.phase {
        ConnectionPhase::Connected => StatusBadge::new("Live", BadgeVariant::Default),
        ConnectionPhase::Connecting => StatusBadge::new("Connecting", BadgeVariant::Destructive),
        ConnectionPhase::Disconnected => {
            StatusBadge::new("Disconnected", BadgeVariant::Destructive)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// Colour of a signed percentage such as `"+12.5%"`.
///
/// `higher_is_better` is false for figures like missed calls, where growth is bad.
pub fn change_tone(change: &str, higher_is_better: bool) -> Tone {
    match (ChangeDirection::of(change), higher_is_better) {
        (ChangeDirection::Flat, _) => Tone::Neutral,
        (ChangeDirection::Up, true) | (ChangeDirection::Down, false) => Tone::Positive,
        (ChangeDirection::Up, false) | (ChangeDirection::Down, true) => Tone::Negative,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

pub fn rank_medal(rank: u32) -> Option<Medal> {
    match rank {
        1 => Some(Medal::Gold),
        2 => Some(Medal::Silver),
        3 => Some(Medal::Bronze),
        _ => None,
    }
}

/// `m:ss`, minutes unbounded.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Whole minutes with the short unit of the configured language.
pub fn format_minutes(seconds: u64, language: &str) -> String {
    let unit = if language.eq_ignore_ascii_case("tr") {
        "dk"
    } else {
        "min"
    };
    format!("{}{unit}", seconds / 60)
}

pub fn format_relative_time(iso_time: &str) -> String {
    format_relative_time_at(iso_time, Utc::now())
}

/// Timestamps that fail to parse are shown as received.
pub fn format_relative_time_at(iso_time: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(iso_time) {
        Ok(parsed) => {
            let elapsed = now.signed_duration_since(parsed.with_timezone(&Utc));
            if elapsed.num_seconds() < 60 {
                "just now".to_string()
            } else if elapsed.num_minutes() < 60 {
                format!("{} min ago", elapsed.num_minutes())
            } else if elapsed.num_hours() < 24 {
                format!("{} h ago", elapsed.num_hours())
            } else {
                format!("{} d ago", elapsed.num_days())
            }
        }
        Err(_) => iso_time.to_string(),
    }
}
