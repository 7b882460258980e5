//! Dashboard row types — pure derived reporting, never stored.
//!
//! Every query is evaluated against a caller-supplied reference date so the
//! results are deterministic and testable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-line counts for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
  pub total_volunteers:        u64,
  pub total_interactions:      u64,
  /// Interactions dated within the last 30 days.
  pub interactions_this_month: u64,
  pub pending_followups:       u64,
  pub overdue_followups:       u64,
  pub active_team_members:     u64,
}

/// One month's interaction count; `month` is `YYYY-MM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
  pub month:             String,
  pub interaction_count: u64,
}

/// Per-member activity over the trailing 30 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamActivityRow {
  pub member_id:               Uuid,
  pub first_name:              String,
  pub last_name:               String,
  pub total_interactions:      u64,
  pub interactions_this_month: u64,
  pub last_interaction_date:   Option<NaiveDate>,
}

/// A volunteer who has gone 30+ days without contact (or was never
/// contacted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinCandidate {
  pub volunteer_id:          Uuid,
  pub first_name:            String,
  pub last_name:             String,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub last_interaction_date: Option<NaiveDate>,
  pub total_interactions:    u64,
}

/// Engagement tiers, bucketed by days since last contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementMetrics {
  pub never_contacted:                u64,
  /// Contacted before, last contact 60+ days ago.
  pub at_risk:                        u64,
  /// Last contact between 30 and 60 days ago.
  pub moderately_engaged:             u64,
  /// Last contact within 30 days.
  pub highly_engaged:                 u64,
  /// Rounded to two decimal places; 0 when there are no volunteers.
  pub avg_interactions_per_volunteer: f64,
}

/// One team member's personal statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStats {
  pub total_interactions:      u64,
  pub interactions_this_month: u64,
  pub interactions_this_week:  u64,
  pub pending_followups:       u64,
  pub volunteers_contacted:    u64,
  pub last_interaction_date:   Option<NaiveDate>,
}
