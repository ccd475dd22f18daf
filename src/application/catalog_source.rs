// Source of the visualization catalog
use crate::domain::catalog::Catalog;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalog. Called once per dashboard request.
    async fn load_catalog(&self) -> anyhow::Result<Catalog>;

    /// Where the catalog comes from, for log and error messages
    fn location(&self) -> String;
}
