use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AddonDependency, AddonPricingEntry, CabinetPricingEntry, NewQuote, PricingCatalog, Quote,
    SurfacePricingEntry,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage seam for the pricing tables and saved quotes.
///
/// Quotes are immutable once created: the trait deliberately offers no
/// update operation. Catalog deletions are scoped by area so imports can
/// replace one area's rows without touching the rest.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    // Cabinet pricing
    async fn list_cabinet_prices(&self) -> Result<Vec<CabinetPricingEntry>, RepositoryError>;
    async fn insert_cabinet_price(
        &self,
        entry: &CabinetPricingEntry,
    ) -> Result<(), RepositoryError>;
    async fn delete_cabinet_prices(&self, area: &str) -> Result<(), RepositoryError>;

    // Surface pricing
    async fn list_surface_prices(&self) -> Result<Vec<SurfacePricingEntry>, RepositoryError>;
    async fn insert_surface_price(
        &self,
        entry: &SurfacePricingEntry,
    ) -> Result<(), RepositoryError>;
    async fn delete_surface_prices(&self, area: &str) -> Result<(), RepositoryError>;

    // Addon pricing
    async fn list_addon_prices(&self) -> Result<Vec<AddonPricingEntry>, RepositoryError>;
    async fn insert_addon_price(&self, entry: &AddonPricingEntry) -> Result<(), RepositoryError>;
    async fn delete_addon_prices(&self, area: &str) -> Result<(), RepositoryError>;

    // Addon dependencies
    async fn list_addon_dependencies(&self) -> Result<Vec<AddonDependency>, RepositoryError>;
    async fn insert_addon_dependency(
        &self,
        dependency: &AddonDependency,
    ) -> Result<(), RepositoryError>;
    async fn delete_addon_dependencies(&self) -> Result<(), RepositoryError>;

    /// Assembles a read-only catalog snapshot from the four pricing tables.
    async fn load_catalog(&self) -> Result<PricingCatalog, RepositoryError> {
        Ok(PricingCatalog::new(
            self.list_cabinet_prices().await?,
            self.list_surface_prices().await?,
            self.list_addon_prices().await?,
            self.list_addon_dependencies().await?,
        ))
    }

    // Quotes
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, RepositoryError>;
    async fn get_quote(&self, id: i64) -> Result<Quote, RepositoryError>;
    /// Saved quotes, newest first.
    async fn list_quotes(&self) -> Result<Vec<Quote>, RepositoryError>;
    async fn delete_quote(&self, id: i64) -> Result<(), RepositoryError>;
}
