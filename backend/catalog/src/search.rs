//! # Global Search
//!
//! Free-text search across the catalog.
//!
//! - Queries go to the API's `/search` endpoint.
//! - If that call fails for any reason, a small embedded index is scanned
//!   instead: case-insensitive substring over title, description and
//!   category. No ranking beyond "found".
//! - Results are shown grouped by kind, in the order kinds first appear.
//! - Interactive callers debounce keystrokes with [`settle`] before searching.
use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc::Receiver, time::timeout};
use tracing::warn;

use crate::client::CatalogClient;

pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Lexicon,
    Reference,
    Asset,
    Contributor,
    Codification,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Lexicon => "lexicon",
            SearchKind::Reference => "reference",
            SearchKind::Asset => "asset",
            SearchKind::Contributor => "contributor",
            SearchKind::Codification => "codification",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Lexicon => "Lexicon",
            SearchKind::Reference => "Reference",
            SearchKind::Asset => "Asset",
            SearchKind::Contributor => "Contributor",
            SearchKind::Codification => "Codification",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SearchResult {
    fn matches(&self, needle: &str) -> bool {
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.category.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchGroup {
    pub kind: SearchKind,
    pub label: &'static str,
    pub results: Vec<SearchResult>,
}

impl CatalogClient {
    pub async fn search(&self, query: &str, kind: Option<SearchKind>) -> Vec<SearchResult> {
        let query = query.trim();

        if query.is_empty() {
            return Vec::new();
        }

        let mut params = vec![("q", query)];
        if let Some(kind) = kind {
            params.push(("type", kind.as_str()));
        }

        let builder = self.request(Method::GET, "search").query(&params);

        match self.send::<SearchResponse>(builder, "search").await {
            Ok(response) => response.results,
            Err(e) => {
                warn!("Search API failed, using local index: {e}");
                local_matches(query, kind)
            }
        }
    }
}

fn entry(
    id: &str,
    kind: SearchKind,
    title: &str,
    description: &str,
    category: &str,
    section: &str,
) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        url: Some(format!("/admin/{section}/{id}")),
    }
}

#[rustfmt::skip]
fn local_index() -> Vec<SearchResult> {
    use SearchKind::*;

    vec![
        entry("lex-1", Lexicon, "Wayang", "Traditional puppet theater", "Seni Pertunjukan", "lexicon"),
        entry("lex-2", Lexicon, "Batik", "Traditional wax-resist dyeing technique", "Kerajinan", "lexicon"),
        entry("lex-3", Lexicon, "Gamelan", "Traditional musical ensemble", "Musik", "lexicon"),
        entry("ref-1", Reference, "Sejarah Budaya Jawa", "Comprehensive history of Javanese culture", "Jurnal", "references"),
        entry("ref-2", Reference, "Tradisi Tengger", "Study of Tengger traditions", "Buku", "references"),
        entry("asset-1", Asset, "Wayang Kulit Performance", "Video of traditional wayang performance", "VIDEO", "assets"),
        entry("asset-2", Asset, "Batik Pattern Collection", "High-resolution images of batik patterns", "FOTO", "assets"),
        entry("contrib-1", Contributor, "Dr. Budi Santoso", "Cultural anthropologist from Universitas Gadjah Mada", "Akademisi", "contributors"),
        entry("cod-1", Codification, "Agama dan Kepercayaan", "Religious and belief systems classification", "AK", "codification"),
    ]
}

/// Offline search over the embedded index.
pub fn local_matches(query: &str, kind: Option<SearchKind>) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return Vec::new();
    }

    local_index()
        .into_iter()
        .filter(|result| kind.is_none_or(|kind| result.kind == kind))
        .filter(|result| result.matches(&needle))
        .collect()
}

pub fn group_by_kind(results: Vec<SearchResult>) -> Vec<SearchGroup> {
    let mut groups: Vec<SearchGroup> = Vec::new();

    for result in results {
        match groups.iter_mut().find(|group| group.kind == result.kind) {
            Some(group) => group.results.push(result),
            None => groups.push(SearchGroup {
                kind: result.kind,
                label: result.kind.label(),
                results: vec![result],
            }),
        }
    }

    groups
}

/// Waits for the next query and returns the last one typed before `quiet`
/// elapsed without further input. `None` once the sender is gone and drained.
pub async fn settle(queries: &mut Receiver<String>, quiet: Duration) -> Option<String> {
    let mut latest = queries.recv().await?;

    loop {
        match timeout(quiet, queries.recv()).await {
            Ok(Some(next)) => latest = next,
            Ok(None) | Err(_) => return Some(latest),
        }
    }
}
