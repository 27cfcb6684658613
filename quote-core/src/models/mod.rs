mod catalog;
mod config;
mod handle;
mod material;
mod measurement;
mod quote;
mod rates;
mod summary;

pub use catalog::{
    AddonDependency, AddonPricingEntry, CabinetPricingEntry, LED_LIGHTING, MaterialPrices,
    PRICE_LEVELS, PricingCatalog, RoundingRule, SurfacePricingEntry, TRANSFORMER, normalize_area,
};
pub use config::{AddonConfig, CabinetConfig, CalculatorConfig, IslandConfig, SurfaceConfig};
pub use handle::HandleType;
pub use material::Material;
pub use measurement::MeasurementKind;
pub use quote::{NewQuote, Quote};
pub use rates::{QuoteRates, RatesError};
pub use summary::{LineItem, PricingSummary};
