//! Async HTTP client for the Planning Center Online API.

use std::{future::Future, time::Duration};

use reqwest::Client;

use crate::{Error, Result, resource::PeoplePage};

const DEFAULT_BASE_URL: &str = "https://api.planningcenteronline.com";

/// Where page payloads come from. [`PcoClient`] is the production
/// implementation; tests substitute an in-memory fake.
pub trait RosterSource: Send + Sync {
  /// Fetch one page of the person collection. `next` is the server-supplied
  /// next-page link from the previous page, absolute; `None` requests the
  /// first page.
  fn people_page<'a>(
    &'a self,
    next: Option<&'a str>,
  ) -> impl Future<Output = Result<PeoplePage>> + Send + 'a;

  /// Fetch one person's team memberships with the linked teams included.
  fn team_memberships<'a>(
    &'a self,
    person_id: &'a str,
  ) -> impl Future<Output = Result<PeoplePage>> + Send + 'a;

  /// Minimal single-record request used by the connectivity probe.
  fn probe(&self) -> impl Future<Output = Result<PeoplePage>> + Send + '_;
}

/// Connection settings for the roster service.
#[derive(Debug, Clone)]
pub struct RosterConfig {
  pub app_id:   String,
  pub secret:   String,
  pub base_url: String,
}

impl RosterConfig {
  pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
    Self {
      app_id:   app_id.into(),
      secret:   secret.into(),
      base_url: DEFAULT_BASE_URL.to_owned(),
    }
  }
}

/// Async HTTP client for the roster service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PcoClient {
  client: Client,
  config: RosterConfig,
}

impl PcoClient {
  /// Build a client. Fails when either credential is absent — there is no
  /// unauthenticated mode.
  pub fn new(config: RosterConfig) -> Result<Self> {
    if config.app_id.is_empty() || config.secret.is_empty() {
      return Err(Error::MissingCredentials);
    }

    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;

    Ok(Self { client, config })
  }

  async fn get_page(&self, url: &str) -> Result<PeoplePage> {
    let resp = self
      .client
      .get(url)
      .basic_auth(&self.config.app_id, Some(&self.config.secret))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        status: resp.status(),
        url:    url.to_owned(),
      });
    }

    Ok(resp.json().await?)
  }
}

impl RosterSource for PcoClient {
  async fn people_page(&self, next: Option<&str>) -> Result<PeoplePage> {
    let first = format!(
      "{}/services/v2/people?per_page=100&include=emails,phone_numbers,addresses",
      self.config.base_url
    );
    self.get_page(next.unwrap_or(&first)).await
  }

  async fn team_memberships(&self, person_id: &str) -> Result<PeoplePage> {
    let url = format!(
      "{}/services/v2/people/{person_id}/team_memberships?include=team",
      self.config.base_url
    );
    self.get_page(&url).await
  }

  async fn probe(&self) -> Result<PeoplePage> {
    let url =
      format!("{}/services/v2/people?per_page=1", self.config.base_url);
    self.get_page(&url).await
  }
}
