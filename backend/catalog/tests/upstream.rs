use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{delete, get},
};
use catalog::{
    CatalogClient, Silent,
    fanout::retain_unlinked,
    models::{Leksikon, LexiconAsset, Reference, SubcultureAsset},
    search::SearchKind,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn(api: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    let app = Router::new().nest("/api/v1", api);

    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve upstream") });

    format!("http://{addr}/api/v1")
}

async fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    format!("http://{addr}/api/v1")
}

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, Duration::from_secs(5)).expect("client")
}

fn leksikon_json(id: u64, word: &str) -> Value {
    json!({
        "leksikonId": id,
        "kataLeksikon": word,
        "ipa": "",
        "transliterasi": word.to_lowercase(),
        "maknaEtimologi": "",
        "maknaKultural": "",
        "commonMeaning": "",
        "translation": word,
        "domainKodifikasiId": 1,
        "statusPreservasi": "MAINTAINED",
        "contributorId": 1,
        "status": "DRAFT"
    })
}

fn subculture_json(id: u64) -> Value {
    json!({
        "subcultureId": id,
        "namaSubculture": format!("Subculture {id}"),
        "penjelasan": "",
        "cultureId": 1,
        "status": "PUBLISHED",
        "statusKonservasi": "MAINTAINED"
    })
}

#[tokio::test]
async fn list_passes_through_upstream_page() {
    let api = Router::new().route(
        "/leksikons",
        get(|| async {
            Json(json!({
                "success": true,
                "message": "Leksikons retrieved",
                "data": [leksikon_json(7, "Ludruk")],
                "total": 1,
                "page": 1,
                "limit": 10,
                "totalPages": 1
            }))
        }),
    );
    let base = spawn(api).await;

    let listing = client(&base).list::<Leksikon>(1, 10).await;

    assert!(!listing.uses_mock_data());
    assert!(!listing.message.contains("mock data"));
    assert_eq!(listing.data[0].kata_leksikon, "Ludruk");
}

#[tokio::test]
async fn list_falls_back_on_error_status() {
    let api = Router::new().route(
        "/referensi",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn(api).await;

    let listing = client(&base).list::<Reference>(2, 2).await;

    assert!(listing.uses_mock_data());
    assert!(listing.message.contains("mock data"));
    assert_eq!(listing.page, 2);
    assert_eq!(listing.data.len(), 2);
    assert_eq!(listing.total, 5);
}

#[tokio::test]
async fn list_falls_back_when_unreachable() {
    let base = dead_upstream().await;

    let listing = client(&base).list::<Leksikon>(1, 10).await;

    assert!(listing.uses_mock_data());
    assert!(listing.message.contains("mock data"));
    assert_eq!(listing.data[0].kata_leksikon, "Batik");
}

#[tokio::test]
async fn get_falls_back_only_for_known_fixture() {
    let base = dead_upstream().await;
    let client = client(&base);

    let item = client.get::<Leksikon>(1).await.expect("fixture fallback");
    assert!(item.uses_mock_data());
    assert_eq!(item.message, "Using mock data");

    assert!(client.get::<Leksikon>(99).await.is_err());
}

#[tokio::test]
async fn writes_do_not_fall_back() {
    let base = dead_upstream().await;

    let deleted = client(&base).delete::<Leksikon>(1).await;

    assert!(deleted.is_err());
}

#[tokio::test]
async fn bearer_token_is_forwarded() {
    let api = Router::new().route(
        "/leksikons/{id}",
        get(|headers: HeaderMap, Path(id): Path<u64>| async move {
            match headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
                Some("Bearer secret-token") => Json(json!({
                    "success": true,
                    "message": "ok",
                    "data": leksikon_json(id, "Reog")
                }))
                .into_response(),
                _ => StatusCode::UNAUTHORIZED.into_response(),
            }
        }),
    );
    let base = spawn(api).await;
    let anonymous = client(&base);

    let item = anonymous
        .with_token("secret-token")
        .get::<Leksikon>(12)
        .await
        .expect("authorized read");
    assert!(!item.uses_mock_data());
    assert_eq!(item.data.kata_leksikon, "Reog");

    assert!(anonymous.get::<Leksikon>(12).await.is_err());
}

#[tokio::test]
async fn aggregation_skips_failing_parent() {
    let api = Router::new()
        .route(
            "/subcultures",
            get(|| async {
                Json(json!({ "data": (1..=5).map(subculture_json).collect::<Vec<_>>() }))
            }),
        )
        .route(
            "/subcultures/{id}/assets",
            get(|Path(id): Path<u64>| async move {
                if id == 3 {
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }

                Json(json!([{ "subcultureId": id, "assetId": id * 10, "assetRole": "GALLERY" }]))
                    .into_response()
            }),
        );
    let base = spawn(api).await;

    let aggregate = client(&base)
        .aggregate::<SubcultureAsset>(&Silent)
        .await
        .expect("aggregation survives one failure");

    assert_eq!(aggregate.parents, 5);
    assert_eq!(aggregate.skipped, vec![3]);

    let assets: Vec<u64> = aggregate.links.iter().map(|link| link.asset_id).collect();
    assert_eq!(assets, vec![10, 20, 40, 50]);
    assert_eq!(aggregate.links[2].nama_subculture.as_deref(), Some("Subculture 4"));
}

#[tokio::test]
async fn aggregation_fails_without_parents() {
    let api = Router::new().route(
        "/leksikons",
        get(|| async { StatusCode::BAD_GATEWAY }),
    );
    let base = spawn(api).await;

    assert!(client(&base).aggregate::<LexiconAsset>(&Silent).await.is_err());
}

#[tokio::test]
async fn remove_link_hits_nested_path() {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = hits.clone();

    let api = Router::new().route(
        "/leksikons/{id}/assets/{asset_id}",
        delete(move |Path((id, asset_id)): Path<(u64, u64)>| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push((id, asset_id));
                StatusCode::NO_CONTENT
            }
        }),
    );
    let base = spawn(api).await;

    let ack = client(&base)
        .remove_link::<LexiconAsset>(4, 2)
        .await
        .expect("unlink");
    assert!(ack.success);
    assert_eq!(*hits.lock().unwrap(), vec![(4, 2)]);

    let mut links: Vec<LexiconAsset> = serde_json::from_value(json!([
        { "leksikonId": 4, "assetId": 2 },
        { "leksikonId": 4, "assetId": 3 }
    ]))
    .unwrap();
    retain_unlinked(&mut links, 4, 2);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].asset_id, 3);
}

#[tokio::test]
async fn search_uses_api_then_local_index() {
    let api = Router::new().route(
        "/search",
        get(|| async {
            Json(json!({
                "results": [{ "id": "lex-9", "type": "lexicon", "title": "Remo" }],
                "total": 1
            }))
        }),
    );
    let base = spawn(api).await;

    let remote = client(&base).search("remo", None).await;
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].title, "Remo");

    let offline = client(&dead_upstream().await)
        .search("batik", Some(SearchKind::Asset))
        .await;
    assert_eq!(offline.len(), 1);
    assert_eq!(offline[0].title, "Batik Pattern Collection");
}

#[tokio::test]
async fn list_without_message_is_upstream_data() {
    let api = Router::new().route(
        "/leksikons",
        get(|| async {
            Json(json!({
                "success": true,
                "data": [],
                "total": 0,
                "page": 1,
                "limit": 10,
                "totalPages": 0
            }))
        }),
    );
    let base = spawn(api).await;

    let listing = client(&base).list::<Leksikon>(1, 10).await;

    assert!(!listing.uses_mock_data());
    assert!(listing.data.is_empty());
    assert_eq!(listing.total, 0);
}

#[tokio::test]
async fn list_drops_only_rows_that_do_not_decode() {
    let api = Router::new().route(
        "/leksikons",
        get(|| async {
            Json(json!({
                "data": [leksikon_json(7, "Ludruk"), { "leksikonId": 8, "kataLeksikon": null }]
            }))
        }),
    );
    let base = spawn(api).await;

    let listing = client(&base).list::<Leksikon>(2, 5).await;

    assert!(!listing.uses_mock_data());
    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].kata_leksikon, "Ludruk");
    assert_eq!(listing.page, 2);
    assert_eq!(listing.limit, 5);
    assert_eq!(listing.total, 1);
}

#[tokio::test]
async fn list_falls_back_on_non_json_body() {
    let api = Router::new().route("/leksikons", get(|| async { "<html>maintenance</html>" }));
    let base = spawn(api).await;

    let listing = client(&base).list::<Leksikon>(1, 10).await;

    assert!(listing.uses_mock_data());
}

#[tokio::test]
async fn aggregation_tolerates_partial_parent_rows() {
    let api = Router::new()
        .route(
            "/subcultures",
            get(|| async {
                Json(json!([
                    subculture_json(1),
                    { "subcultureId": 2, "namaSubculture": "Osing", "penjelasan": null },
                    { "namaSubculture": "No id" }
                ]))
            }),
        )
        .route(
            "/subcultures/{id}/assets",
            get(|Path(id): Path<u64>| async move {
                Json(json!([{ "assetId": id + 100, "assetRole": "GALLERY" }]))
            }),
        );
    let base = spawn(api).await;

    let aggregate = client(&base)
        .aggregate::<SubcultureAsset>(&Silent)
        .await
        .expect("aggregation survives odd parent rows");

    assert_eq!(aggregate.parents, 2);
    assert!(aggregate.skipped.is_empty());
    assert_eq!(aggregate.links.len(), 2);
    assert_eq!(aggregate.links[1].subculture_id, 2);
    assert_eq!(aggregate.links[1].nama_subculture.as_deref(), Some("Osing"));
}

#[tokio::test]
async fn delete_without_success_field_is_acknowledged() {
    let api = Router::new()
        .route(
            "/leksikons/{id}",
            delete(|| async { Json(json!({ "deleted": true })) }),
        )
        .route(
            "/subcultures/{id}/assets/{asset_id}",
            delete(|| async { Json(json!({ "success": false, "message": "Link is locked" })) }),
        );
    let base = spawn(api).await;
    let client = client(&base);

    let deleted = client.delete::<Leksikon>(3).await.expect("delete");
    assert!(deleted.success);
    assert_eq!(deleted.message, "Deleted leksikon 3");

    let refused = client
        .remove_link::<SubcultureAsset>(1, 2)
        .await
        .expect("unlink answered");
    assert!(!refused.success);
    assert_eq!(refused.message, "Link is locked");
}
