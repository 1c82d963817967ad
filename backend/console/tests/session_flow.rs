use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
    routing::{get, post},
};
use catalog::CatalogClient;
use corpora_console::{
    cli::{Command, Entity, LinkKind},
    commands::protected,
    session::{Gate, SessionState},
    token_store::TokenStore,
};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tokio::net::TcpListener;

const GOOD_TOKEN: &str = "good-token";

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });

    format!("http://{addr}")
}

/// Admin service accepting one password and one token.
async fn fake_admin() -> String {
    let app = Router::new()
        .route(
            "/api/admin/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] != "admin123" {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Invalid email or password" })),
                    )
                        .into_response();
                }

                Json(json!({
                    "success": true,
                    "token": GOOD_TOKEN,
                    "user": { "id": 1, "email": "admin@budaya.com", "name": "Admin User" }
                }))
                .into_response()
            }),
        )
        .route(
            "/api/admin/verify",
            get(|headers: HeaderMap| async move {
                match headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
                    Some("Bearer good-token") => Json(json!({
                        "success": true,
                        "user": { "id": 1, "email": "admin@budaya.com" }
                    }))
                    .into_response(),
                    _ => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Token expired" })),
                    )
                        .into_response(),
                }
            }),
        )
        .route(
            "/api/admin/logout",
            post(|| async { Json(json!({ "success": true })) }),
        );

    serve(app).await
}

fn gate(server: &str) -> (Gate, TokenStore, TempDir) {
    let dir = tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("token"));
    let gate = Gate::new(server, store.clone(), Duration::from_secs(5)).expect("gate");

    (gate, store, dir)
}

#[tokio::test]
async fn login_stores_token_and_verifies() {
    let server = fake_admin().await;
    let (gate, store, _dir) = gate(&server);

    assert_eq!(gate.verify().await.unwrap(), SessionState::NoToken);

    let user = gate.login("admin@budaya.com", "admin123").await.unwrap();
    assert_eq!(user.name.as_deref(), Some("Admin User"));
    assert_eq!(store.load().unwrap().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(
        gate.current().unwrap(),
        SessionState::Unverified(GOOD_TOKEN.to_string())
    );

    match gate.verify().await.unwrap() {
        SessionState::Verified { token, user } => {
            assert_eq!(token, GOOD_TOKEN);
            assert_eq!(user.email, "admin@budaya.com");
        }
        other => panic!("expected a verified session, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let server = fake_admin().await;
    let (gate, store, _dir) = gate(&server);

    let error = gate.login("admin@budaya.com", "wrong").await.unwrap_err();

    assert!(error.to_string().contains("Invalid email or password"));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn rejected_token_is_cleared() {
    let server = fake_admin().await;
    let (gate, store, _dir) = gate(&server);
    store.save("stale-token").unwrap();

    assert_eq!(
        gate.verify().await.unwrap(),
        SessionState::Rejected("Token expired".to_string())
    );
    assert_eq!(store.load().unwrap(), None);
    assert!(gate.require().await.is_err());
}

#[tokio::test]
async fn unreachable_service_rejects_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (gate, store, _dir) = gate(&dead);
    store.save(GOOD_TOKEN).unwrap();

    assert!(matches!(gate.verify().await.unwrap(), SessionState::Rejected(_)));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_clears_store() {
    let server = fake_admin().await;
    let (gate, store, _dir) = gate(&server);
    gate.login("admin@budaya.com", "admin123").await.unwrap();

    gate.logout().await.unwrap();

    assert_eq!(store.load().unwrap(), None);
    assert!(gate.require().await.is_err());
}

fn offline_catalog() -> CatalogClient {
    CatalogClient::new("http://127.0.0.1:9/api/v1", Duration::from_secs(2))
        .expect("catalog client")
        .with_token(GOOD_TOKEN)
}

#[tokio::test]
async fn list_command_renders_fallback() {
    let output = protected(
        &offline_catalog(),
        Command::List {
            entity: Entity::Asset,
            page: 1,
            limit: 10,
            search: "batik".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(output.contains("mock data"));
    assert!(output.contains("batik-sample.jpg"));
    assert!(!output.contains("gamelan-recording.mp3"));
    assert!(output.ends_with("Showing 1 to 5 of 5 (page 1/1)"));
}

#[tokio::test]
async fn links_command_reports_skipped_parents() {
    let api = Router::new()
        .route(
            "/leksikons",
            get(|| async {
                Json(json!([
                    {
                        "leksikonId": 1, "kataLeksikon": "Batik", "ipa": "", "transliterasi": "",
                        "maknaEtimologi": "", "maknaKultural": "", "commonMeaning": "",
                        "translation": "", "domainKodifikasiId": 1,
                        "statusPreservasi": "MAINTAINED", "contributorId": 1, "status": "PUBLISHED"
                    },
                    {
                        "leksikonId": 2, "kataLeksikon": "Gamelan", "ipa": "", "transliterasi": "",
                        "maknaEtimologi": "", "maknaKultural": "", "commonMeaning": "",
                        "translation": "", "domainKodifikasiId": 1,
                        "statusPreservasi": "MAINTAINED", "contributorId": 1, "status": "PUBLISHED"
                    }
                ]))
            }),
        )
        .route(
            "/leksikons/1/references",
            get(|| async { Json(json!({ "data": [{ "leksikonId": 1, "referensiId": 7 }] })) }),
        )
        .route(
            "/leksikons/2/references",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
    let upstream = serve(Router::new().nest("/api/v1", api)).await;
    let client = CatalogClient::new(format!("{upstream}/api/v1"), Duration::from_secs(5)).unwrap();

    let output = protected(
        &client,
        Command::Links {
            kind: LinkKind::LexiconReferences,
            search: String::new(),
        },
    )
    .await
    .unwrap();

    assert!(output.contains("1 -> 7"));
    assert!(output.contains("Batik"));
    assert!(output.contains("1 of 1 references across 2 parents"));
    assert!(output.ends_with("! Skipped parents: 2"));
}

#[tokio::test]
async fn delete_command_propagates_outage() {
    let result = protected(
        &offline_catalog(),
        Command::Delete {
            entity: Entity::Lexicon,
            id: 1,
        },
    )
    .await;

    assert!(result.is_err());
}
