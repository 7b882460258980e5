//! JSON:API envelope and resource types for roster payloads.
//!
//! Primary records arrive in `data` with their contact sub-records
//! out-of-line in a shared `included` bucket, linked by type-and-id pairs.
//! `data` and `included` are kept as loose [`serde_json::Value`]s so one
//! malformed record cannot poison an otherwise usable page; individual
//! records are firmed up into [`RawResource`] on demand.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of a paginated collection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeoplePage {
  #[serde(default)]
  pub data:     Vec<Value>,
  #[serde(default)]
  pub included: Vec<Value>,
  #[serde(default)]
  pub links:    PageLinks,
  #[serde(default)]
  pub meta:     PageMeta,
}

/// Cursor-style pagination: follow `next` until absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
  pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
  pub total_count: Option<u64>,
}

/// A firmed-up JSON:API resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
  #[serde(rename = "type")]
  pub kind:          String,
  pub id:            String,
  #[serde(default)]
  pub attributes:    Map<String, Value>,
  #[serde(default)]
  pub relationships: Map<String, Value>,
}

impl RawResource {
  pub fn attr_str(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).and_then(Value::as_str)
  }
}

/// The `included` bucket indexed by `(type, id)`, built once per page so
/// relationship pointers resolve without rescanning.
pub struct IncludedMap {
  by_key: HashMap<(String, String), RawResource>,
}

impl IncludedMap {
  /// Index a page's `included` values. Entries that don't parse as
  /// resources are skipped; a dangling relationship pointer then simply
  /// resolves to nothing.
  pub fn from_values(values: &[Value]) -> Self {
    let mut by_key = HashMap::with_capacity(values.len());
    for value in values {
      match serde_json::from_value::<RawResource>(value.clone()) {
        Ok(resource) => {
          by_key
            .insert((resource.kind.clone(), resource.id.clone()), resource);
        }
        Err(error) => {
          tracing::debug!(%error, "skipping unparseable included resource");
        }
      }
    }
    Self { by_key }
  }

  pub fn get(&self, kind: &str, id: &str) -> Option<&RawResource> {
    self.by_key.get(&(kind.to_owned(), id.to_owned()))
  }
}
