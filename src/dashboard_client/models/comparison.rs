use serde::{Deserialize, Serialize};

use super::stats::QueueStatistics;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    #[default]
    Stable,
    #[serde(other)]
    Unknown,
}

/// Sign of a precomputed change string such as `"+12%"` or `"-4%"`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

impl ChangeDirection {
    pub fn of(change: &str) -> Self {
        let trimmed = change.trim();
        if trimmed.starts_with('+') {
            ChangeDirection::Up
        } else if trimmed.starts_with('-') {
            ChangeDirection::Down
        } else {
            ChangeDirection::Flat
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComparisonSummary {
    #[serde(default)]
    pub calls_change: String,
    #[serde(default)]
    pub answered_change: String,
    #[serde(default)]
    pub missed_change: String,
    #[serde(default)]
    pub duration_change: String,
    #[serde(default)]
    pub callers_change: String,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub summary: String,
}

/// Current-vs-previous period figures from `/compare/weekly` or `/compare/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComparisonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_week: Option<QueueStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_week: Option<QueueStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_month: Option<QueueStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_month: Option<QueueStatistics>,
    #[serde(default)]
    pub comparison: ComparisonSummary,
    #[serde(default)]
    pub period_name: String,
}

impl ComparisonData {
    pub fn current(&self) -> Option<&QueueStatistics> {
        self.current_week.as_ref().or(self.current_month.as_ref())
    }

    pub fn previous(&self) -> Option<&QueueStatistics> {
        self.previous_week.as_ref().or(self.previous_month.as_ref())
    }
}
