//! Dashboard aggregation over guests and wishes.

use serde::{Deserialize, Serialize};

use super::guest::{Attendance, Guest};

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: i64,
    pub attending: i64,
    pub not_attending: i64,
    pub uncertain: i64,
    pub total_wishes: i64,
    /// Sum of party sizes of attending guests; a missing count counts as one.
    pub expected_attendees: i64,
    pub attending_percent: f64,
    pub not_attending_percent: f64,
    pub uncertain_percent: f64,
}

/// Raw counts as aggregated by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuestCounts {
    pub attending: i64,
    pub not_attending: i64,
    pub uncertain: i64,
    pub expected_attendees: i64,
}

impl DashboardStats {
    pub fn from_counts(counts: GuestCounts, total_wishes: i64) -> Self {
        let total = counts.attending + counts.not_attending + counts.uncertain;
        Self {
            total,
            attending: counts.attending,
            not_attending: counts.not_attending,
            uncertain: counts.uncertain,
            total_wishes,
            expected_attendees: counts.expected_attendees,
            attending_percent: percent(counts.attending, total),
            not_attending_percent: percent(counts.not_attending, total),
            uncertain_percent: percent(counts.uncertain, total),
        }
    }

    pub fn from_guests(guests: &[Guest], total_wishes: i64) -> Self {
        let mut stats = DashboardStats {
            total_wishes,
            ..Default::default()
        };
        for guest in guests {
            stats.total += 1;
            match guest.attendance {
                Attendance::Attending => {
                    stats.attending += 1;
                    stats.expected_attendees +=
                        i64::from(guest.effective_guest_count().unwrap_or(1));
                }
                Attendance::NotAttending => stats.not_attending += 1,
                Attendance::Uncertain => stats.uncertain += 1,
            }
        }
        stats.attending_percent = percent(stats.attending, stats.total);
        stats.not_attending_percent = percent(stats.not_attending, stats.total);
        stats.uncertain_percent = percent(stats.uncertain, stats.total);
        stats
    }
}

/// Share of `part` in `total` as a percentage, 0.0 when `total` is zero.
pub fn percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}
