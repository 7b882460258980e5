//! [`RosterSync`] — full-roster reconciliation into a volunteer store.
//!
//! Every run pages through the complete remote collection and upserts each
//! extracted record keyed by its external roster id. Nothing is ever deleted
//! locally; a volunteer absent from the latest pull is left untouched.

use std::sync::Arc;

use flock_core::{
  store::VolunteerStore,
  sync::{ConnectionProbe, SyncIssue, SyncReport},
  volunteer::{RosterPerson, UpsertOutcome},
};

use crate::{
  client::RosterSource,
  extract::{extract_person, extract_team_names, record_id},
  resource::IncludedMap,
};

pub struct RosterSync<S, R> {
  store:  Arc<S>,
  source: R,
}

impl<S, R> RosterSync<S, R>
where
  S: VolunteerStore,
  R: RosterSource,
{
  pub fn new(store: Arc<S>, source: R) -> Self { Self { store, source } }

  /// Run one full sync. Never fails as a whole: per-record extraction and
  /// save failures are collected, and a page-fetch transport failure stops
  /// pagination while keeping everything already extracted.
  pub async fn sync(&self) -> SyncReport {
    let mut report = SyncReport::default();
    let mut people: Vec<RosterPerson> = Vec::new();

    tracing::info!("starting roster sync");

    let mut next: Option<String> = None;
    loop {
      let page = match self.source.people_page(next.as_deref()).await {
        Ok(page) => page,
        Err(error) => {
          tracing::error!(%error, "roster page fetch failed; aborting pagination");
          report
            .errors
            .push(SyncIssue::transport(format!("page fetch failed: {error}")));
          break;
        }
      };

      let included = IncludedMap::from_values(&page.included);
      for raw in &page.data {
        match extract_person(raw, &included) {
          Ok(person) => people.push(person),
          Err(error) => {
            let id = record_id(raw);
            tracing::error!(record_id = ?id, %error, "failed to extract person record");
            report.errors.push(SyncIssue {
              record_id: id,
              message:   error.to_string(),
            });
          }
        }
      }

      match page.links.next {
        Some(link) => next = Some(link),
        None => break,
      }
    }

    tracing::info!(fetched = people.len(), "roster fetch complete");

    for person in people {
      let roster_id = person.roster_id.clone();
      match self.store.upsert_synced(person).await {
        Ok(UpsertOutcome::Created(_)) => report.created += 1,
        Ok(UpsertOutcome::Updated(_)) => report.updated += 1,
        Err(error) => {
          tracing::error!(%roster_id, %error, "failed to save volunteer");
          report
            .errors
            .push(SyncIssue::record(roster_id, error.to_string()));
        }
      }
    }

    tracing::info!(
      created = report.created,
      updated = report.updated,
      errors = report.errors.len(),
      "roster sync complete"
    );
    report
  }

  /// Fetch one person's team names. Failures are logged and yield an empty
  /// list; the cached team list is best-effort by design.
  pub async fn fetch_teams(&self, roster_id: &str) -> Vec<String> {
    match self.source.team_memberships(roster_id).await {
      Ok(page) => extract_team_names(&page),
      Err(error) => {
        tracing::error!(%roster_id, %error, "failed to fetch team memberships");
        Vec::new()
      }
    }
  }

  /// Issue a minimal single-page request to verify credentials and report
  /// the server's total person count.
  pub async fn test_connection(&self) -> ConnectionProbe {
    match self.source.probe().await {
      Ok(page) => ConnectionProbe {
        success:      true,
        message:      "roster connection successful".to_owned(),
        people_count: page.meta.total_count,
      },
      Err(error) => ConnectionProbe {
        success:      false,
        message:      format!("roster connection failed: {error}"),
        people_count: None,
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::NaiveDate;
  use flock_core::{
    interaction::{
      Interaction, InteractionQuery, InteractionUpdate, NewInteraction,
    },
    member::{NewTeamMember, TeamMember},
    stats::{
      CheckinCandidate, DashboardOverview, EngagementMetrics, MemberStats,
      TeamActivityRow, TrendPoint,
    },
    store::VolunteerStore,
    volunteer::{NewVolunteer, Volunteer, VolunteerUpdate},
  };
  use flock_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use uuid::Uuid;

  use super::*;
  use crate::{Error, Result, resource::PeoplePage};

  /// Serves pre-built page fixtures; a `None` slot simulates a transport
  /// failure for that page.
  struct FakeSource {
    pages: Vec<Option<Value>>,
  }

  impl FakeSource {
    fn new(pages: Vec<Option<Value>>) -> Self { Self { pages } }

    fn page_at(&self, index: usize) -> Result<PeoplePage> {
      match self.pages.get(index) {
        Some(Some(value)) => Ok(serde_json::from_value(value.clone())?),
        Some(None) => Err(Error::MissingCredentials),
        None => Ok(PeoplePage::default()),
      }
    }
  }

  impl RosterSource for FakeSource {
    async fn people_page(&self, next: Option<&str>) -> Result<PeoplePage> {
      let index = match next {
        None => 0,
        Some(link) => link
          .rsplit('/')
          .next()
          .and_then(|s| s.parse().ok())
          .unwrap_or(0),
      };
      self.page_at(index)
    }

    async fn team_memberships(&self, _person_id: &str) -> Result<PeoplePage> {
      self.page_at(0)
    }

    async fn probe(&self) -> Result<PeoplePage> { self.page_at(0) }
  }

  fn person(id: &str, first: &str) -> Value {
    json!({
      "type": "Person", "id": id,
      "attributes": { "first_name": first, "last_name": "Test" },
      "relationships": {}
    })
  }

  /// A record whose email relationship entry has no id.
  fn malformed_person(id: &str) -> Value {
    json!({
      "type": "Person", "id": id,
      "attributes": { "first_name": "Broken", "last_name": "Record" },
      "relationships": { "emails": { "data": [{ "type": "Email" }] } }
    })
  }

  fn page(people: Vec<Value>, next: Option<&str>, total: u64) -> Value {
    json!({
      "data": people,
      "included": [],
      "links": { "next": next },
      "meta": { "total_count": total }
    })
  }

  async fn engine(
    pages: Vec<Option<Value>>,
  ) -> (Arc<SqliteStore>, RosterSync<SqliteStore, FakeSource>) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let sync = RosterSync::new(store.clone(), FakeSource::new(pages));
    (store, sync)
  }

  #[tokio::test]
  async fn two_page_sync_with_one_bad_record() {
    // Page 0: 100 records, one malformed. Page 1: 5 records, no next link.
    let mut first: Vec<Value> =
      (0..99).map(|i| person(&format!("p{i}"), "First")).collect();
    first.push(malformed_person("bad-1"));
    let second: Vec<Value> =
      (100..105).map(|i| person(&format!("p{i}"), "First")).collect();

    let pages = vec![
      Some(page(first, Some("https://rost.er/pages/1"), 105)),
      Some(page(second, None, 105)),
    ];
    let (_store, sync) = engine(pages).await;

    let report = sync.sync().await;
    assert_eq!(report.created, 104);
    assert_eq!(report.updated, 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].record_id.as_deref(), Some("bad-1"));

    // Immediately syncing the same input again only updates.
    let second_run = sync.sync().await;
    assert_eq!(second_run.created, 0);
    assert_eq!(second_run.updated, 104);
    assert_eq!(second_run.errors.len(), 1);
  }

  #[tokio::test]
  async fn resync_is_idempotent() {
    let pages = vec![Some(page(
      vec![person("p1", "Grace"), person("p2", "Sam")],
      None,
      2,
    ))];
    let (store, sync) = engine(pages).await;

    let first = sync.sync().await;
    assert_eq!((first.created, first.updated), (2, 0));
    assert!(first.errors.is_empty());

    let second = sync.sync().await;
    assert_eq!((second.created, second.updated), (0, 2));

    assert_eq!(store.list_volunteers().await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn changed_name_keeps_single_row_per_roster_id() {
    let (store, sync) =
      engine(vec![Some(page(vec![person("p1", "Grace")], None, 1))]).await;
    sync.sync().await;

    let renamed = RosterSync::new(
      store.clone(),
      FakeSource::new(vec![Some(page(vec![person("p1", "Gracie")], None, 1))]),
    );
    renamed.sync().await;

    let all = store.list_volunteers().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name, "Gracie");
    assert_eq!(all[0].roster_id.as_deref(), Some("p1"));
  }

  #[tokio::test]
  async fn transport_error_keeps_prior_pages() {
    let first: Vec<Value> =
      (0..3).map(|i| person(&format!("p{i}"), "First")).collect();
    let pages = vec![
      Some(page(first, Some("https://rost.er/pages/1"), 10)),
      None, // page 1 fails at the transport level
    ];
    let (store, sync) = engine(pages).await;

    let report = sync.sync().await;
    assert_eq!(report.created, 3);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].record_id.is_none());

    assert_eq!(store.list_volunteers().await.unwrap().len(), 3);
  }

  #[tokio::test]
  async fn fetch_teams_returns_empty_on_failure() {
    let (_store, sync) = engine(vec![None]).await;
    assert!(sync.fetch_teams("p1").await.is_empty());
  }

  #[tokio::test]
  async fn probe_reports_total_count() {
    let (_store, sync) =
      engine(vec![Some(page(vec![person("p1", "Grace")], None, 731))]).await;

    let probe = sync.test_connection().await;
    assert!(probe.success);
    assert_eq!(probe.people_count, Some(731));
  }

  #[tokio::test]
  async fn probe_failure_is_reported_not_raised() {
    let (_store, sync) = engine(vec![None]).await;

    let probe = sync.test_connection().await;
    assert!(!probe.success);
    assert!(probe.people_count.is_none());
  }

  /// Delegates to an in-memory store but rejects the upsert for one
  /// roster id, simulating a per-record save failure.
  struct FlakyStore {
    inner:  SqliteStore,
    reject: String,
  }

  impl VolunteerStore for FlakyStore {
    type Error = flock_store_sqlite::Error;

    async fn add_volunteer(
      &self,
      input: NewVolunteer,
    ) -> Result<Volunteer, Self::Error> {
      self.inner.add_volunteer(input).await
    }

    async fn get_volunteer(
      &self,
      id: Uuid,
    ) -> Result<Option<Volunteer>, Self::Error> {
      self.inner.get_volunteer(id).await
    }

    async fn find_by_roster_id(
      &self,
      roster_id: &str,
    ) -> Result<Option<Volunteer>, Self::Error> {
      self.inner.find_by_roster_id(roster_id).await
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, Self::Error> {
      self.inner.list_volunteers().await
    }

    async fn update_volunteer(
      &self,
      id: Uuid,
      update: VolunteerUpdate,
    ) -> Result<Volunteer, Self::Error> {
      self.inner.update_volunteer(id, update).await
    }

    async fn delete_volunteer(&self, id: Uuid) -> Result<(), Self::Error> {
      self.inner.delete_volunteer(id).await
    }

    async fn upsert_synced(
      &self,
      person: RosterPerson,
    ) -> Result<UpsertOutcome, Self::Error> {
      if person.roster_id == self.reject {
        return Err(flock_store_sqlite::Error::Decode(
          "write rejected".to_owned(),
        ));
      }
      self.inner.upsert_synced(person).await
    }

    async fn set_teams(
      &self,
      id: Uuid,
      teams: Vec<String>,
    ) -> Result<(), Self::Error> {
      self.inner.set_teams(id, teams).await
    }

    async fn record_interaction(
      &self,
      input: NewInteraction,
    ) -> Result<Interaction, Self::Error> {
      self.inner.record_interaction(input).await
    }

    async fn get_interaction(
      &self,
      id: Uuid,
    ) -> Result<Option<Interaction>, Self::Error> {
      self.inner.get_interaction(id).await
    }

    async fn list_interactions(
      &self,
      query: InteractionQuery,
    ) -> Result<Vec<Interaction>, Self::Error> {
      self.inner.list_interactions(query).await
    }

    async fn update_interaction(
      &self,
      id: Uuid,
      update: InteractionUpdate,
    ) -> Result<Interaction, Self::Error> {
      self.inner.update_interaction(id, update).await
    }

    async fn delete_interaction(&self, id: Uuid) -> Result<(), Self::Error> {
      self.inner.delete_interaction(id).await
    }

    async fn complete_followup(
      &self,
      id: Uuid,
      on: NaiveDate,
    ) -> Result<Interaction, Self::Error> {
      self.inner.complete_followup(id, on).await
    }

    async fn add_team_member(
      &self,
      input: NewTeamMember,
    ) -> Result<TeamMember, Self::Error> {
      self.inner.add_team_member(input).await
    }

    async fn get_team_member(
      &self,
      id: Uuid,
    ) -> Result<Option<TeamMember>, Self::Error> {
      self.inner.get_team_member(id).await
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, Self::Error> {
      self.inner.list_team_members().await
    }

    async fn delete_team_member(&self, id: Uuid) -> Result<(), Self::Error> {
      self.inner.delete_team_member(id).await
    }

    async fn overview(
      &self,
      today: NaiveDate,
    ) -> Result<DashboardOverview, Self::Error> {
      self.inner.overview(today).await
    }

    async fn interaction_trends(
      &self,
      since: NaiveDate,
    ) -> Result<Vec<TrendPoint>, Self::Error> {
      self.inner.interaction_trends(since).await
    }

    async fn team_activity(
      &self,
      today: NaiveDate,
    ) -> Result<Vec<TeamActivityRow>, Self::Error> {
      self.inner.team_activity(today).await
    }

    async fn volunteers_needing_checkin(
      &self,
      today: NaiveDate,
      limit: usize,
    ) -> Result<Vec<CheckinCandidate>, Self::Error> {
      self.inner.volunteers_needing_checkin(today, limit).await
    }

    async fn engagement_metrics(
      &self,
      today: NaiveDate,
    ) -> Result<EngagementMetrics, Self::Error> {
      self.inner.engagement_metrics(today).await
    }

    async fn member_stats(
      &self,
      member_id: Uuid,
      today: NaiveDate,
    ) -> Result<MemberStats, Self::Error> {
      self.inner.member_stats(member_id, today).await
    }

    async fn recent_interactions(
      &self,
      limit: usize,
    ) -> Result<Vec<Interaction>, Self::Error> {
      self.inner.recent_interactions(limit).await
    }

    async fn upcoming_followups(
      &self,
      today: NaiveDate,
      days: u32,
    ) -> Result<Vec<Interaction>, Self::Error> {
      self.inner.upcoming_followups(today, days).await
    }
  }

  #[tokio::test]
  async fn save_failure_is_collected_and_rest_still_land() {
    let inner = SqliteStore::open_in_memory().await.unwrap();
    let store = Arc::new(FlakyStore { inner, reject: "p1".to_owned() });
    let sync = RosterSync::new(
      store.clone(),
      FakeSource::new(vec![Some(page(
        vec![person("p0", "Grace"), person("p1", "Sam"), person("p2", "Ivy")],
        None,
        3,
      ))]),
    );

    let report = sync.sync().await;
    assert_eq!(report.created, 2);
    assert_eq!(report.updated, 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].record_id.as_deref(), Some("p1"));

    // The records around the failure still landed.
    assert_eq!(store.list_volunteers().await.unwrap().len(), 2);
  }
}
