use std::sync::Arc;

use anyhow::Result;
use catalog::CatalogClient;
use tracing::info;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    /// Anonymous client. Handlers scope it to the caller with `with_token`.
    pub catalog: CatalogClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let catalog = CatalogClient::new(&config.catalog_url, config.catalog_timeout)?;
        info!("Catalog API at {}", catalog.base_url());

        Ok(Arc::new(Self { config, catalog }))
    }
}
