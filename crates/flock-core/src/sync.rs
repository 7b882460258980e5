//! Result types for the roster sync routine.
//!
//! A sync run never fails as a whole; everything that went wrong is carried
//! in the report so the caller can surface it as data.

use serde::{Deserialize, Serialize};

/// One failed record (extraction or save) or, with `record_id = None`, a
/// page-level transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIssue {
  pub record_id: Option<String>,
  pub message:   String,
}

impl SyncIssue {
  pub fn record(id: impl Into<String>, message: impl Into<String>) -> Self {
    Self { record_id: Some(id.into()), message: message.into() }
  }

  pub fn transport(message: impl Into<String>) -> Self {
    Self { record_id: None, message: message.into() }
  }
}

/// Aggregate outcome of one full sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
  pub created: u64,
  pub updated: u64,
  pub errors:  Vec<SyncIssue>,
}

/// Outcome of the connectivity probe against the roster service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionProbe {
  pub success:      bool,
  pub message:      String,
  /// Server-reported total person count; only present on success.
  pub people_count: Option<u64>,
}
