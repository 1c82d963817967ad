//! JSON views behind the session guard. One generic set of handlers serves
//! every catalog collection, scoped to the caller's token.
use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use catalog::{
    Link, Progress, Resource,
    filter::filter_items,
    models::{Ack, Item},
    pagination::{DEFAULT_LIMIT, PageWindow},
    search::{SearchGroup, SearchKind, group_by_kind},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{error::AppError, guard::Session, state::AppState};

pub const SECTIONS: [(&str, &str); 9] = [
    ("Lexicon", "/admin/lexicon"),
    ("Subculture", "/admin/subculture"),
    ("Cultures", "/admin/cultures"),
    ("Contributors", "/admin/contributors"),
    ("References", "/admin/references"),
    ("Assets", "/admin/assets"),
    ("Codification", "/admin/codification"),
    ("Lexicon Assets", "/admin/lexicon/assets"),
    ("Subculture Assets", "/admin/subculture/assets"),
];

#[derive(Serialize)]
pub struct Section {
    label: &'static str,
    href: &'static str,
}

#[derive(Serialize)]
pub struct Shell {
    user: ShellUser,
    sections: Vec<Section>,
}

#[derive(Serialize)]
pub struct ShellUser {
    id: u64,
    email: String,
}

pub async fn shell_view(Extension(session): Extension<Session>) -> Json<Shell> {
    Json(Shell {
        user: ShellUser {
            id: session.claims.id,
            email: session.claims.email,
        },
        sections: SECTIONS
            .iter()
            .map(|&(label, href)| Section { label, href })
            .collect(),
    })
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    #[serde(default)]
    search: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    items: Vec<T>,
    page: u32,
    limit: u32,
    total: u64,
    total_pages: u32,
    range: String,
    has_previous: bool,
    has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<String>,
}

pub async fn list_view<R: Resource>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> Json<ListView<R>> {
    let client = state.catalog.with_token(session.token);
    let listing = client
        .list::<R>(query.page.unwrap_or(1), query.limit.unwrap_or(DEFAULT_LIMIT))
        .await;

    let window = PageWindow::new(listing.page, listing.limit, listing.total);
    let banner = listing.uses_mock_data().then(|| listing.message.clone());

    Json(ListView {
        items: filter_items(&listing.data, &query.search),
        page: window.page,
        limit: window.limit,
        total: window.total,
        total_pages: window.total_pages(),
        range: window.range_label(),
        has_previous: window.has_previous(),
        has_next: window.has_next(),
        banner,
    })
}

#[derive(Serialize)]
pub struct DetailView<T> {
    item: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<String>,
}

pub async fn detail_view<R: Resource>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<u64>,
) -> Result<Json<DetailView<R>>, AppError> {
    let item = state.catalog.with_token(session.token).get::<R>(id).await?;
    let banner = item.uses_mock_data().then(|| item.message.clone());

    Ok(Json(DetailView {
        item: item.data,
        banner,
    }))
}

pub async fn create_view<R: Resource>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<Item<R>>), AppError> {
    let Json(input) = payload.map_err(|_| AppError::MalformedPayload)?;

    let created = state.catalog.with_token(session.token).create::<R>(&input).await?;
    info!("Created {} {}", R::LABEL, created.data.id());

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_view<R: Resource>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item<R>>, AppError> {
    let patch = match payload {
        Ok(Json(patch @ Value::Object(_))) => patch,
        _ => return Err(AppError::MalformedPayload),
    };

    let updated = state
        .catalog
        .with_token(session.token)
        .update::<R, Value>(id, &patch)
        .await?;
    info!("Updated {} {id}", R::LABEL);

    Ok(Json(updated))
}

pub async fn delete_view<R: Resource>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<u64>,
) -> Result<Json<Ack>, AppError> {
    let ack = state.catalog.with_token(session.token).delete::<R>(id).await?;
    info!("Deleted {} {id}", R::LABEL);

    Ok(Json(ack))
}

struct LogProgress;

impl Progress for LogProgress {
    fn advance(&self, current: usize, total: usize, parent: &str) {
        info!("Processing {current} of {total}: {parent}");
    }

    fn finish(&self, collected: usize) {
        info!("Collected {collected} links");
    }
}

#[derive(Deserialize, Default)]
pub struct LinksQuery {
    #[serde(default)]
    search: String,
}

#[derive(Serialize)]
pub struct LinksView<L> {
    links: Vec<L>,
    total: usize,
    parents: usize,
    skipped: Vec<u64>,
}

pub async fn links_view<L: Link>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<LinksQuery>,
) -> Result<Json<LinksView<L>>, AppError> {
    let aggregate = state
        .catalog
        .with_token(session.token)
        .aggregate::<L>(&LogProgress)
        .await?;

    Ok(Json(LinksView {
        total: aggregate.links.len(),
        links: filter_items(&aggregate.links, &query.search),
        parents: aggregate.parents,
        skipped: aggregate.skipped,
    }))
}

pub async fn unlink_view<L: Link>(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path((parent_id, child_id)): Path<(u64, u64)>,
) -> Result<Json<Ack>, AppError> {
    let ack = state
        .catalog
        .with_token(session.token)
        .remove_link::<L>(parent_id, child_id)
        .await?;
    info!("Unlinked {} {child_id} from {parent_id}", L::CHILD);

    Ok(Json(ack))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
    #[serde(rename = "type")]
    kind: Option<SearchKind>,
}

#[derive(Serialize)]
pub struct SearchView {
    query: String,
    total: usize,
    groups: Vec<SearchGroup>,
}

pub async fn search_view(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchView> {
    let results = state
        .catalog
        .with_token(session.token)
        .search(&query.q, query.kind)
        .await;

    Json(SearchView {
        total: results.len(),
        query: query.q.trim().to_string(),
        groups: group_by_kind(results),
    })
}
