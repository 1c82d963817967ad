//! # Link Aggregation
//!
//! The catalog API has no endpoint listing every join record at once, so the
//! link pages are assembled by hand:
//!
//! 1. fetch every parent (all leksikons, all subcultures)
//! 2. for each parent, in order, fetch its children
//! 3. stamp each child with its parent's id and display name
//! 4. a child fetch that fails is logged and skipped, the rest carry on
//!
//! Fetches run one after another so `(current, total)` progress stays
//! meaningful. Admin datasets are small enough for the N+1 round trips.
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    client::CatalogClient,
    error::CatalogError,
    models::{
        Ack, LexiconAsset, LexiconReference, Leksikon, Payload, Subculture, SubcultureAsset, rows,
    },
    resource::{Resource, Searchable},
};

/// A collection that owns link children. Aggregation reads only the two
/// keys below from each parent row, the rest of the record may be anything.
pub trait ParentResource: Resource {
    const ID_KEY: &'static str;
    const NAME_KEY: &'static str;
}

impl ParentResource for Leksikon {
    const ID_KEY: &'static str = "leksikonId";
    const NAME_KEY: &'static str = "kataLeksikon";
}

impl ParentResource for Subculture {
    const ID_KEY: &'static str = "subcultureId";
    const NAME_KEY: &'static str = "namaSubculture";
}

/// Identity of a parent row.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub id: u64,
    pub name: String,
}

impl ParentRef {
    /// `None` when the row carries no numeric id.
    pub fn project<P: ParentResource>(row: &Value) -> Option<Self> {
        let id = row.get(P::ID_KEY)?.as_u64()?;
        let name = row
            .get(P::NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self { id, name })
    }
}

/// A join record nested under a parent collection.
pub trait Link: Serialize + DeserializeOwned + Searchable + Clone + Send + Sync + 'static {
    type Parent: ParentResource;

    /// Child segment under a parent, e.g. `assets`.
    const CHILD: &'static str;

    fn parent_id(&self) -> u64;

    fn child_id(&self) -> u64;

    /// Stamps the record with its parent's identity.
    fn decorate(&mut self, parent: &ParentRef);
}

impl Searchable for LexiconAsset {
    fn haystack(&self) -> Vec<&str> {
        [
            self.kata_leksikon.as_deref(),
            self.asset.as_ref().map(|asset| asset.nama_file.as_str()),
            Some(self.asset_role.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Link for LexiconAsset {
    type Parent = Leksikon;
    const CHILD: &'static str = "assets";

    fn parent_id(&self) -> u64 {
        self.leksikon_id
    }

    fn child_id(&self) -> u64 {
        self.asset_id
    }

    fn decorate(&mut self, parent: &ParentRef) {
        self.leksikon_id = parent.id;
        self.kata_leksikon = Some(parent.name.clone());
    }
}

impl Searchable for LexiconReference {
    fn haystack(&self) -> Vec<&str> {
        [
            self.kata_leksikon.as_deref(),
            self.referensi.as_ref().map(|reference| reference.judul.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Link for LexiconReference {
    type Parent = Leksikon;
    const CHILD: &'static str = "references";

    fn parent_id(&self) -> u64 {
        self.leksikon_id
    }

    fn child_id(&self) -> u64 {
        self.referensi_id
    }

    fn decorate(&mut self, parent: &ParentRef) {
        self.leksikon_id = parent.id;
        self.kata_leksikon = Some(parent.name.clone());
    }
}

impl Searchable for SubcultureAsset {
    fn haystack(&self) -> Vec<&str> {
        [
            self.nama_subculture.as_deref(),
            self.asset.as_ref().map(|asset| asset.nama_file.as_str()),
            Some(self.asset_role.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Link for SubcultureAsset {
    type Parent = Subculture;
    const CHILD: &'static str = "assets";

    fn parent_id(&self) -> u64 {
        self.subculture_id
    }

    fn child_id(&self) -> u64 {
        self.asset_id
    }

    fn decorate(&mut self, parent: &ParentRef) {
        self.subculture_id = parent.id;
        self.nama_subculture = Some(parent.name.clone());
    }
}

/// Observer for the parent loop.
pub trait Progress: Send + Sync {
    fn start(&self, _total: usize) {}

    /// Called before fetching the children of the `current`-th parent (1 based).
    fn advance(&self, _current: usize, _total: usize, _parent: &str) {}

    fn finish(&self, _collected: usize) {}
}

pub struct Silent;

impl Progress for Silent {}

#[derive(Serialize, Debug, Clone)]
pub struct Aggregate<L> {
    pub links: Vec<L>,
    pub parents: usize,
    /// Parents whose children could not be fetched.
    pub skipped: Vec<u64>,
}

fn children_path<L: Link>(parent_id: u64) -> String {
    format!("{}/{parent_id}/{}", <L::Parent as Resource>::PATH, L::CHILD)
}

fn link_path<L: Link>(parent_id: u64, child_id: u64) -> String {
    format!("{}/{child_id}", children_path::<L>(parent_id))
}

impl CatalogClient {
    pub async fn children<L: Link>(&self, parent_id: u64) -> Result<Vec<L>, CatalogError> {
        let payload: Payload<L> = self.get_json(&children_path::<L>(parent_id)).await?;

        Ok(payload.into_vec())
    }

    /// Every `L` across every parent. Only the parent fetch can fail the call,
    /// parent rows without an id are logged and passed over.
    pub async fn aggregate<L: Link>(
        &self,
        progress: &dyn Progress,
    ) -> Result<Aggregate<L>, CatalogError> {
        let path = <L::Parent as Resource>::PATH;
        let id_key = <L::Parent as ParentResource>::ID_KEY;
        let body: Value = self.get_json(path).await?;

        let parents: Vec<ParentRef> = rows(&body)
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let parent = ParentRef::project::<L::Parent>(row);
                if parent.is_none() {
                    warn!("Parent row {index} from {path} has no {id_key}");
                }
                parent
            })
            .collect();
        let total = parents.len();

        info!(
            "Found {total} {} parents for {} links",
            <L::Parent as Resource>::LABEL,
            L::CHILD
        );
        progress.start(total);

        let mut links = Vec::new();
        let mut skipped = Vec::new();

        for (index, parent) in parents.iter().enumerate() {
            progress.advance(index + 1, total, &parent.name);

            match self.children::<L>(parent.id).await {
                Ok(children) => {
                    info!("{}: {} {}", parent.name, children.len(), L::CHILD);

                    links.extend(children.into_iter().map(|mut child| {
                        child.decorate(parent);
                        child
                    }));
                }
                Err(e) => {
                    warn!(
                        "Skipping {} of {} {}: {e}",
                        L::CHILD,
                        <L::Parent as Resource>::LABEL,
                        parent.id
                    );
                    skipped.push(parent.id);
                }
            }
        }

        progress.finish(links.len());
        info!("Total {} links found: {}", L::CHILD, links.len());

        Ok(Aggregate {
            links,
            parents: total,
            skipped,
        })
    }

    pub async fn remove_link<L: Link>(
        &self,
        parent_id: u64,
        child_id: u64,
    ) -> Result<Ack, CatalogError> {
        let path = link_path::<L>(parent_id, child_id);

        self.acknowledge(path, format!("Removed {} {child_id}", L::CHILD))
            .await
    }
}

/// Drops the removed pair from a local list, no refetch needed.
pub fn retain_unlinked<L: Link>(links: &mut Vec<L>, parent_id: u64, child_id: u64) {
    links.retain(|link| !(link.parent_id() == parent_id && link.child_id() == child_id));
}
