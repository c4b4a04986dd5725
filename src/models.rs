//! Frontend Models
//!
//! Data structures matching the server's JSON.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dispute workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeStatus {
    Pending,
    UnderReview,
    Resolved,
    Rejected,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 4] = [
        DisputeStatus::Pending,
        DisputeStatus::UnderReview,
        DisputeStatus::Resolved,
        DisputeStatus::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisputeStatus::Pending => "Pending",
            DisputeStatus::UnderReview => "Under review",
            DisputeStatus::Resolved => "Resolved",
            DisputeStatus::Rejected => "Rejected",
        }
    }

    /// Value used in the status filter `<select>`
    pub fn key(self) -> &'static str {
        match self {
            DisputeStatus::Pending => "pending",
            DisputeStatus::UnderReview => "under-review",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Rejected => "rejected",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Closed disputes no longer accept a decision
    pub fn is_closed(self) -> bool {
        matches!(self, DisputeStatus::Resolved | DisputeStatus::Rejected)
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            DisputeStatus::Pending => "badge badge-warning",
            DisputeStatus::UnderReview => "badge badge-info",
            DisputeStatus::Resolved => "badge badge-success",
            DisputeStatus::Rejected => "badge badge-danger",
        }
    }
}

/// Compensation dispute raised on a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: u32,
    pub booking_code: String,
    pub item_title: String,
    pub renter_name: String,
    pub owner_name: String,
    pub claimed_amount: f64,
    pub status: DisputeStatus,
    pub created_at: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Dispute {
    /// Server-rendered details page
    pub fn details_href(&self) -> String {
        format!("/Admin/Compensation/Details/{}", self.id)
    }
}

/// User notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Parse a server timestamp.
/// Accepts RFC 3339 and zone-less ISO values, the latter taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Human relative time ("5 min ago"), falling back to a date after a week
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{} min ago", secs / 60),
        3_600..=86_399 => format!("{} h ago", secs / 3_600),
        86_400..=604_799 => format!("{} d ago", secs / 86_400),
        _ => then.format("%Y-%m-%d").to_string(),
    }
}

/// Format a money amount with two decimals and thousands separators
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}
