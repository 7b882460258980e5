//! Field extraction from raw person records.
//!
//! A person's email, phone, and address live in the page's `included` bucket
//! and are reached through relationship pointers. Extraction of one record
//! never aborts a page; the caller collects the error and moves on.

use serde_json::Value;

use flock_core::volunteer::RosterPerson;

use crate::{
  Error, Result,
  resource::{IncludedMap, PeoplePage},
};

/// The external id of a raw record, when it has one. Used to key error
/// entries for records that fail extraction.
pub fn record_id(raw: &Value) -> Option<String> {
  raw.get("id").and_then(Value::as_str).map(str::to_owned)
}

/// Resolve the first entry of a relationship into the included bucket.
///
/// Absent or empty relationships are `Ok(None)`; an entry that is not an
/// object with a string `id` is a malformed-relationship error. A pointer to
/// a resource the server did not include resolves to `Ok(None)`.
fn first_linked<'a>(
  raw: &Value,
  name: &'static str,
  kind: &str,
  included: &'a IncludedMap,
) -> Result<Option<&'a crate::resource::RawResource>> {
  let entries = match raw.pointer(&format!("/relationships/{name}/data")) {
    None | Some(Value::Null) => return Ok(None),
    Some(Value::Array(entries)) => entries,
    Some(_) => return Err(Error::MalformedRelationship { name }),
  };

  let Some(first) = entries.first() else {
    return Ok(None);
  };

  let id = first
    .get("id")
    .and_then(Value::as_str)
    .ok_or(Error::MalformedRelationship { name })?;

  Ok(included.get(kind, id))
}

fn attr_str(raw: &Value, name: &str) -> Option<String> {
  raw
    .pointer(&format!("/attributes/{name}"))
    .and_then(Value::as_str)
    .map(str::to_owned)
}

/// Extract one normalised [`RosterPerson`] from a raw `data` record.
pub fn extract_person(
  raw: &Value,
  included: &IncludedMap,
) -> Result<RosterPerson> {
  let roster_id = record_id(raw).ok_or(Error::MissingId)?;

  let email = first_linked(raw, "emails", "Email", included)?
    .and_then(|r| r.attr_str("address"))
    .map(str::to_owned);

  let phone = first_linked(raw, "phone_numbers", "PhoneNumber", included)?
    .and_then(|r| r.attr_str("number"))
    .map(str::to_owned);

  let address = first_linked(raw, "addresses", "Address", included)?
    .map(joined_address)
    .filter(|a| !a.is_empty());

  Ok(RosterPerson {
    roster_id,
    first_name: attr_str(raw, "first_name").unwrap_or_default(),
    last_name: attr_str(raw, "last_name").unwrap_or_default(),
    email,
    phone,
    address,
  })
}

/// Join street/city/state/zip into one comma-separated line, skipping parts
/// the record doesn't carry.
fn joined_address(resource: &crate::resource::RawResource) -> String {
  ["street", "city", "state", "zip"]
    .iter()
    .filter_map(|part| resource.attr_str(part))
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Pull deduplicated team names out of a team-membership page, resolving
/// each membership's `team` pointer through the included bucket. Rows that
/// don't resolve are skipped.
pub fn extract_team_names(page: &PeoplePage) -> Vec<String> {
  let included = IncludedMap::from_values(&page.included);
  let mut teams: Vec<String> = Vec::new();

  for membership in &page.data {
    let Some(id) = membership
      .pointer("/relationships/team/data/id")
      .and_then(Value::as_str)
    else {
      continue;
    };
    let Some(name) =
      included.get("Team", id).and_then(|t| t.attr_str("name"))
    else {
      continue;
    };
    if !teams.iter().any(|t| t == name) {
      teams.push(name.to_owned());
    }
  }

  teams
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn included() -> IncludedMap {
    IncludedMap::from_values(&[
      json!({
        "type": "Email", "id": "e1",
        "attributes": { "address": "grace@example.com" }
      }),
      json!({
        "type": "PhoneNumber", "id": "ph1",
        "attributes": { "number": "555-0100" }
      }),
      json!({
        "type": "Address", "id": "a1",
        "attributes": {
          "street": "12 Chapel Rd", "city": "Springfield",
          "state": "IL", "zip": "62704"
        }
      }),
    ])
  }

  #[test]
  fn extracts_contact_fields_through_included_bucket() {
    let raw = json!({
      "type": "Person", "id": "p1",
      "attributes": { "first_name": "Grace", "last_name": "Kim" },
      "relationships": {
        "emails":        { "data": [{ "type": "Email", "id": "e1" }] },
        "phone_numbers": { "data": [{ "type": "PhoneNumber", "id": "ph1" }] },
        "addresses":     { "data": [{ "type": "Address", "id": "a1" }] }
      }
    });

    let person = extract_person(&raw, &included()).unwrap();
    assert_eq!(person.roster_id, "p1");
    assert_eq!(person.first_name, "Grace");
    assert_eq!(person.email.as_deref(), Some("grace@example.com"));
    assert_eq!(person.phone.as_deref(), Some("555-0100"));
    assert_eq!(
      person.address.as_deref(),
      Some("12 Chapel Rd, Springfield, IL, 62704")
    );
  }

  #[test]
  fn missing_relationships_yield_empty_contact_fields() {
    let raw = json!({
      "type": "Person", "id": "p2",
      "attributes": { "first_name": "Sam", "last_name": "Okafor" }
    });

    let person = extract_person(&raw, &included()).unwrap();
    assert_eq!(person.roster_id, "p2");
    assert!(person.email.is_none());
    assert!(person.phone.is_none());
    assert!(person.address.is_none());
  }

  #[test]
  fn dangling_pointer_resolves_to_nothing() {
    let raw = json!({
      "type": "Person", "id": "p3",
      "attributes": { "first_name": "Ivy" },
      "relationships": {
        "emails": { "data": [{ "type": "Email", "id": "missing" }] }
      }
    });

    let person = extract_person(&raw, &included()).unwrap();
    assert!(person.email.is_none());
  }

  #[test]
  fn relationship_entry_without_id_is_an_error() {
    let raw = json!({
      "type": "Person", "id": "p4",
      "attributes": {},
      "relationships": {
        "emails": { "data": [{ "type": "Email" }] }
      }
    });

    let err = extract_person(&raw, &included()).unwrap_err();
    assert!(
      matches!(err, Error::MalformedRelationship { name } if name == "emails")
    );
  }

  #[test]
  fn record_without_id_is_an_error() {
    let raw = json!({ "type": "Person", "attributes": {} });
    assert!(matches!(
      extract_person(&raw, &included()).unwrap_err(),
      Error::MissingId
    ));
  }

  #[test]
  fn address_join_skips_empty_parts() {
    let map = IncludedMap::from_values(&[json!({
      "type": "Address", "id": "a2",
      "attributes": { "street": "4 Vine St", "city": "", "zip": "10001" }
    })]);
    let raw = json!({
      "type": "Person", "id": "p5",
      "relationships": {
        "addresses": { "data": [{ "type": "Address", "id": "a2" }] }
      }
    });

    let person = extract_person(&raw, &map).unwrap();
    assert_eq!(person.address.as_deref(), Some("4 Vine St, 10001"));
  }

  #[test]
  fn team_names_resolve_and_deduplicate() {
    let page: PeoplePage = serde_json::from_value(json!({
      "data": [
        { "type": "TeamMembership", "id": "m1",
          "relationships": { "team": { "data": { "type": "Team", "id": "t1" } } } },
        { "type": "TeamMembership", "id": "m2",
          "relationships": { "team": { "data": { "type": "Team", "id": "t2" } } } },
        { "type": "TeamMembership", "id": "m3",
          "relationships": { "team": { "data": { "type": "Team", "id": "t1" } } } },
        { "type": "TeamMembership", "id": "m4" }
      ],
      "included": [
        { "type": "Team", "id": "t1", "attributes": { "name": "Band" } },
        { "type": "Team", "id": "t2", "attributes": { "name": "Tech" } }
      ]
    }))
    .unwrap();

    assert_eq!(extract_team_names(&page), &["Band", "Tech"]);
  }
}
