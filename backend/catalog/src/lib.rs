//! # Catalog
//!
//! Everything the admin surfaces need to talk to the cultural-heritage
//! catalog API: lexicon entries, subcultures, cultures, contributors,
//! references, media assets and domain codification records.
//!
//! ## Layout
//! - [`models`]: wire records, inputs and envelopes
//! - [`resource`]: the [`Resource`] trait tying a record to its collection
//! - [`client`]: [`CatalogClient`], reads fall back to [`fixtures`]
//! - [`fanout`]: link aggregation across parents
//! - [`search`]: global search with a local fallback index
//! - [`pagination`], [`filter`]: page arithmetic and the filter box
//! - [`config`]: environment helpers shared by the binaries
pub mod client;
pub mod config;
pub mod error;
pub mod fanout;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod pagination;
pub mod resource;
pub mod search;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use fanout::{Aggregate, Link, ParentRef, ParentResource, Progress, Silent};
pub use resource::{Resource, Searchable};
