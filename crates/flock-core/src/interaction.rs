//! Interaction — a dated record of one conversation with a volunteer.
//!
//! Follow-up state lives on the interaction itself. "Overdue" is computed at
//! read time from the follow-up fields and is never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// An interaction as stored. `member_id` survives team-member deletion by
/// being cleared; deleting the volunteer deletes the interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
  pub interaction_id:          Uuid,
  pub volunteer_id:            Uuid,
  pub member_id:               Option<Uuid>,
  pub interaction_date:        NaiveDate,
  pub discussion_notes:        String,
  /// Ordered list of topic tags.
  pub topics:                  Vec<String>,
  pub needs_followup:          bool,
  pub followup_date:           Option<NaiveDate>,
  pub followup_notes:          Option<String>,
  pub followup_completed:      bool,
  pub followup_completed_date: Option<NaiveDate>,
  pub created_at:              DateTime<Utc>,
  pub updated_at:              DateTime<Utc>,
}

impl Interaction {
  /// A follow-up is overdue when it was requested, has not been completed,
  /// and its due date is strictly before `today`.
  pub fn is_followup_overdue(&self, today: NaiveDate) -> bool {
    self.needs_followup
      && !self.followup_completed
      && self.followup_date.is_some_and(|due| due < today)
  }
}

/// Input to [`crate::store::VolunteerStore::record_interaction`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewInteraction {
  pub volunteer_id:     Uuid,
  #[serde(default)]
  pub member_id:        Option<Uuid>,
  pub interaction_date: NaiveDate,
  pub discussion_notes: String,
  #[serde(default)]
  pub topics:           Vec<String>,
  #[serde(default)]
  pub needs_followup:   bool,
  #[serde(default)]
  pub followup_date:    Option<NaiveDate>,
  #[serde(default)]
  pub followup_notes:   Option<String>,
}

impl NewInteraction {
  /// Requesting a follow-up without a due date is invalid.
  pub fn validate(&self) -> Result<()> {
    if self.needs_followup && self.followup_date.is_none() {
      return Err(Error::MissingField { field: "followup_date" });
    }
    Ok(())
  }
}

/// Partial update for an interaction. `None` fields are left unchanged; the
/// follow-up invariant is re-checked against the merged record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionUpdate {
  pub interaction_date: Option<NaiveDate>,
  pub discussion_notes: Option<String>,
  pub topics:           Option<Vec<String>>,
  pub needs_followup:   Option<bool>,
  pub followup_date:    Option<NaiveDate>,
  pub followup_notes:   Option<String>,
}

/// Filter parameters for [`crate::store::VolunteerStore::list_interactions`].
#[derive(Debug, Clone, Default)]
pub struct InteractionQuery {
  pub volunteer_id: Option<Uuid>,
  pub member_id:    Option<Uuid>,
  /// Only follow-ups that are requested and not yet completed.
  pub pending:      bool,
  /// Like `pending`, but additionally past due relative to this date.
  pub overdue_on:   Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use uuid::Uuid;

  use super::*;

  fn interaction(
    needs_followup: bool,
    followup_date: Option<NaiveDate>,
    followup_completed: bool,
  ) -> Interaction {
    Interaction {
      interaction_id: Uuid::new_v4(),
      volunteer_id: Uuid::new_v4(),
      member_id: None,
      interaction_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
      discussion_notes: "talked after rehearsal".into(),
      topics: vec![],
      needs_followup,
      followup_date,
      followup_notes: None,
      followup_completed,
      followup_completed_date: None,
      created_at: chrono::Utc::now(),
      updated_at: chrono::Utc::now(),
    }
  }

  #[test]
  fn followup_due_yesterday_is_overdue() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let i = interaction(true, today.pred_opt(), false);
    assert!(i.is_followup_overdue(today));
  }

  #[test]
  fn followup_due_tomorrow_is_not_overdue() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let i = interaction(true, today.succ_opt(), false);
    assert!(!i.is_followup_overdue(today));
  }

  #[test]
  fn completed_followup_is_never_overdue() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let i = interaction(true, today.pred_opt(), true);
    assert!(!i.is_followup_overdue(today));
  }

  #[test]
  fn no_followup_requested_is_not_overdue() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let i = interaction(false, None, false);
    assert!(!i.is_followup_overdue(today));
  }

  #[test]
  fn validate_rejects_followup_without_date() {
    let input = NewInteraction {
      volunteer_id: Uuid::new_v4(),
      member_id: None,
      interaction_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
      discussion_notes: "needs a call next week".into(),
      topics: vec![],
      needs_followup: true,
      followup_date: None,
      followup_notes: None,
    };

    let err = input.validate().unwrap_err();
    assert!(
      matches!(err, Error::MissingField { field } if field == "followup_date")
    );
  }

  #[test]
  fn validate_accepts_followup_with_date() {
    let input = NewInteraction {
      volunteer_id: Uuid::new_v4(),
      member_id: None,
      interaction_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
      discussion_notes: "all good".into(),
      topics: vec!["scheduling".into()],
      needs_followup: true,
      followup_date: NaiveDate::from_ymd_opt(2025, 6, 8),
      followup_notes: None,
    };

    assert!(input.validate().is_ok());
  }
}
