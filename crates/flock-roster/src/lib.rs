//! Planning Center Online roster client and reconciliation engine.
//!
//! [`PcoClient`] speaks the JSON:API-style wire format; [`RosterSync`]
//! reconciles fetched person records into any
//! [`flock_core::store::VolunteerStore`]. The [`RosterSource`] trait sits
//! between them so the engine can be tested without a network.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod error;
pub mod extract;
pub mod resource;
pub mod sync;

pub use client::{PcoClient, RosterConfig, RosterSource};
pub use error::{Error, Result};
pub use sync::RosterSync;
