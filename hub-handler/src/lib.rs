//! Dataset hub access: listing, per-dataset lookups and record collection.
//!
//! Every lookup failure is logged and leaves the affected field at its
//! null or "none" sentinel, so a single bad dataset never stops a run.

pub mod client;
pub mod collector;
pub mod enrich;

pub use client::{HubClient, HubConfig, HubError};
pub use collector::{CategoryQuery, Collection, CollectionSource, Collector, KeywordSearch};
pub use enrich::enrich_records;
