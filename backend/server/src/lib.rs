//! Admin service for the cultural-heritage catalog.
//!
//! # Surfaces
//! - `/api/admin/{login,verify,logout}`: session lifecycle
//! - `/admin/login`: login page descriptor, the only unguarded admin path
//! - `/admin/**`: JSON views over the catalog, behind both guards
//!
//! # Sessions
//!
//! **Goal**: keep anyone without a session out of the admin views before any
//! catalog call is made.
//!
//! - Login issues a token and sets it as the `adminToken` cookie (HttpOnly,
//!   SameSite=Lax, one day)
//! - The edge guard redirects cookieless requests to `/admin/login`
//! - The session guard decodes the token, rejects expired ones, clears the
//!   cookie and redirects
//! - Handlers forward the token as a bearer credential to the catalog API
//!
//! The token is not signed. The catalog API is the real authority.
//!
//! # Catalog Outages
//! Reads degrade to embedded fixtures and carry a `banner`. Writes and link
//! removals never do.
//!
//! # Setup
//!
//! Run against a local catalog.
//! ```sh
//! CATALOG_API_URL=http://localhost:8000/api/v1 RUST_LOG=info cargo run --bin corpora
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use catalog::{
    Link, Resource,
    models::{
        Asset, Contributor, Culture, DomainKodifikasi, Leksikon, LexiconAsset, LexiconReference,
        Reference, Subculture, SubcultureAsset,
    },
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod cookies;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use config::Config;
use guard::{edge_guard, session_guard};
use routes::{login_handler, login_page_handler, logout_handler, verify_handler};
use state::AppState;
use views::{
    create_view, delete_view, detail_view, links_view, list_view, search_view, shell_view,
    unlink_view, update_view,
};

type AdminRouter = Router<Arc<AppState>>;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");
    let app = build_router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

fn resource_routes<R: Resource>(router: AdminRouter, base: &str) -> AdminRouter {
    router
        .route(base, get(list_view::<R>).post(create_view::<R>))
        .route(
            &format!("{base}/{{id}}"),
            get(detail_view::<R>)
                .put(update_view::<R>)
                .delete(delete_view::<R>),
        )
}

fn link_routes<L: Link>(router: AdminRouter, parent_base: &str) -> AdminRouter {
    router
        .route(&format!("{parent_base}/{}", L::CHILD), get(links_view::<L>))
        .route(
            &format!("{parent_base}/{{id}}/{}/{{child_id}}", L::CHILD),
            delete(unlink_view::<L>),
        )
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let mut admin = Router::new()
        .route("/admin", get(shell_view))
        .route("/admin/search", get(search_view));

    admin = resource_routes::<Leksikon>(admin, "/admin/lexicon");
    admin = resource_routes::<Subculture>(admin, "/admin/subculture");
    admin = resource_routes::<Culture>(admin, "/admin/cultures");
    admin = resource_routes::<Contributor>(admin, "/admin/contributors");
    admin = resource_routes::<Reference>(admin, "/admin/references");
    admin = resource_routes::<Asset>(admin, "/admin/assets");
    admin = resource_routes::<DomainKodifikasi>(admin, "/admin/codification");

    admin = link_routes::<LexiconAsset>(admin, "/admin/lexicon");
    admin = link_routes::<LexiconReference>(admin, "/admin/lexicon");
    admin = link_routes::<SubcultureAsset>(admin, "/admin/subculture");

    let admin = admin.route_layer(from_fn_with_state(state.clone(), session_guard));

    Router::new()
        .route("/api/admin/login", post(login_handler))
        .route("/api/admin/verify", get(verify_handler))
        .route("/api/admin/logout", post(logout_handler))
        .route("/admin/login", get(login_page_handler))
        .merge(admin)
        .layer(from_fn(edge_guard))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            info!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                info!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
