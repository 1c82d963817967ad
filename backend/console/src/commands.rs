use std::{fs, time::Duration};

use anyhow::{Context, Result, bail};
use catalog::{
    CatalogClient, Link, Resource,
    config::catalog_url,
    fanout::retain_unlinked,
    filter::filter_items,
    models::{
        Asset, Contributor, Culture, DomainKodifikasi, Leksikon, LexiconAsset, LexiconReference,
        Reference, Subculture, SubcultureAsset,
    },
    pagination::DEFAULT_LIMIT,
    search::{DEBOUNCE, SearchKind, group_by_kind, settle},
};
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, BufReader, stdin},
    sync::mpsc,
};
use tracing::info;

use crate::{
    cli::{Body, Cli, Command, Entity, LinkKind},
    progress::BarProgress,
    render,
    session::{Gate, SessionState},
    token_store::TokenStore,
};

/// Runs `$body` with `$r` bound to the record type behind an [`Entity`].
macro_rules! with_resource {
    ($entity:expr, $r:ident => $body:expr) => {
        match $entity {
            Entity::Lexicon => {
                type $r = Leksikon;
                $body
            }
            Entity::Subculture => {
                type $r = Subculture;
                $body
            }
            Entity::Culture => {
                type $r = Culture;
                $body
            }
            Entity::Contributor => {
                type $r = Contributor;
                $body
            }
            Entity::Reference => {
                type $r = Reference;
                $body
            }
            Entity::Asset => {
                type $r = Asset;
                $body
            }
            Entity::Codification => {
                type $r = DomainKodifikasi;
                $body
            }
        }
    };
}

macro_rules! with_link {
    ($kind:expr, $l:ident => $body:expr) => {
        match $kind {
            LinkKind::LexiconAssets => {
                type $l = LexiconAsset;
                $body
            }
            LinkKind::LexiconReferences => {
                type $l = LexiconReference;
                $body
            }
            LinkKind::SubcultureAssets => {
                type $l = SubcultureAsset;
                $body
            }
        }
    };
}

pub async fn run(cli: Cli) -> Result<()> {
    let timeout = Duration::from_secs(cli.timeout);
    let gate = Gate::new(&cli.server_url, TokenStore::new(&cli.token_file), timeout)?;
    let catalog = CatalogClient::new(cli.catalog_url.unwrap_or_else(catalog_url), timeout)?;

    match cli.command {
        Command::Login { email, password } => {
            let user = gate.login(&email, &password).await?;
            println!(
                "Logged in as {} <{}>",
                user.name.as_deref().unwrap_or("admin"),
                user.email
            );
        }
        Command::Logout => {
            gate.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match gate.verify().await? {
            SessionState::Verified { user, .. } => println!("{} (id {})", user.email, user.id),
            SessionState::Rejected(reason) => println!("{reason}. Please log in again"),
            _ => println!("Not logged in"),
        },
        command => {
            let (token, user) = gate.require().await?;
            info!("Acting as {}", user.email);

            println!("{}", protected(&catalog.with_token(token), command).await?);
        }
    }

    Ok(())
}

/// Commands that need a verified session. Returns the text to print.
pub async fn protected(client: &CatalogClient, command: Command) -> Result<String> {
    match command {
        Command::List {
            entity,
            page,
            limit,
            search,
        } => with_resource!(entity, R => list::<R>(client, page, limit, &search).await),
        Command::Show { entity, id } => with_resource!(entity, R => show::<R>(client, id).await),
        Command::Create { entity, body } => {
            let document = read_body(&body)?;
            with_resource!(entity, R => create::<R>(client, document).await)
        }
        Command::Update { entity, id, body } => {
            let document = read_body(&body)?;
            with_resource!(entity, R => update::<R>(client, id, document).await)
        }
        Command::Delete { entity, id } => {
            with_resource!(entity, R => delete::<R>(client, id).await)
        }
        Command::Links { kind, search } => with_link!(kind, L => links::<L>(client, &search).await),
        Command::Unlink {
            kind,
            parent_id,
            child_id,
        } => with_link!(kind, L => unlink::<L>(client, parent_id, child_id).await),
        Command::Search { query: Some(query), kind } => {
            let results = client.search(&query, kind.map(SearchKind::from)).await;
            Ok(render::search(&group_by_kind(results)))
        }
        Command::Search { query: None, kind } => {
            interactive_search(client, kind.map(SearchKind::from)).await?;
            Ok(String::new())
        }
        Command::Login { .. } | Command::Logout | Command::Whoami => {
            bail!("Session commands are handled before verification")
        }
    }
}

fn read_body(body: &Body) -> Result<Value> {
    let raw = match (&body.json, &body.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Provide --json or --file"),
    };

    serde_json::from_str(&raw).context("Body is not valid JSON")
}

pub async fn list<R: Resource>(
    client: &CatalogClient,
    page: u32,
    limit: u32,
    search: &str,
) -> Result<String> {
    let listing = client.list::<R>(page, limit).await;
    let rows = filter_items(&listing.data, search);

    Ok(render::listing(&listing, &rows))
}

pub async fn show<R: Resource>(client: &CatalogClient, id: u64) -> Result<String> {
    let item = client.get::<R>(id).await?;

    Ok(render::item(&item)?)
}

/// Mutations are followed by a fresh first page.
async fn refreshed<R: Resource>(client: &CatalogClient, headline: String) -> Result<String> {
    let page = list::<R>(client, 1, DEFAULT_LIMIT, "").await?;

    Ok(format!("{headline}\n\n{page}"))
}

pub async fn create<R: Resource>(client: &CatalogClient, document: Value) -> Result<String> {
    let input: R::Input = serde_json::from_value(document)
        .with_context(|| format!("Body is not a valid {} input", R::LABEL))?;

    let created = client.create::<R>(&input).await?;
    let headline = format!("Created {} {}", R::LABEL, created.data.id());

    refreshed::<R>(client, headline).await
}

pub async fn update<R: Resource>(client: &CatalogClient, id: u64, patch: Value) -> Result<String> {
    if !patch.is_object() {
        bail!("Update body must be a JSON object");
    }

    client.update::<R, Value>(id, &patch).await?;

    refreshed::<R>(client, format!("Updated {} {id}", R::LABEL)).await
}

pub async fn delete<R: Resource>(client: &CatalogClient, id: u64) -> Result<String> {
    client.delete::<R>(id).await?;

    refreshed::<R>(client, format!("Deleted {} {id}", R::LABEL)).await
}

pub async fn links<L: Link>(client: &CatalogClient, search: &str) -> Result<String> {
    let aggregate = client.aggregate::<L>(&BarProgress::new()).await?;
    let rows = filter_items(&aggregate.links, search);

    Ok(render::links(&aggregate, &rows))
}

/// Removes one link from a freshly aggregated list and shows the remainder
/// without refetching.
pub async fn unlink<L: Link>(
    client: &CatalogClient,
    parent_id: u64,
    child_id: u64,
) -> Result<String> {
    let mut aggregate = client.aggregate::<L>(&BarProgress::new()).await?;

    let known = aggregate
        .links
        .iter()
        .any(|link| link.parent_id() == parent_id && link.child_id() == child_id);
    if !known {
        bail!("No {} link {child_id} under parent {parent_id}", L::CHILD);
    }

    client.remove_link::<L>(parent_id, child_id).await?;
    retain_unlinked(&mut aggregate.links, parent_id, child_id);

    let rows = aggregate.links.clone();
    Ok(format!(
        "Removed {} {child_id} from {parent_id}\n\n{}",
        L::CHILD,
        render::links(&aggregate, &rows)
    ))
}

/// Reads queries line by line from stdin and searches once typing settles.
async fn interactive_search(client: &CatalogClient, kind: Option<SearchKind>) -> Result<()> {
    let (sender, mut queries) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(stdin()).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if sender.send(line).await.is_err() {
                break;
            }
        }
    });

    eprintln!("Type to search, Ctrl+D to quit");

    while let Some(query) = settle(&mut queries, DEBOUNCE).await {
        let results = client.search(&query, kind).await;
        println!("{}\n", render::search(&group_by_kind(results)));
    }

    Ok(())
}
