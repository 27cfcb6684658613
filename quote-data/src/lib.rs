pub mod loader;

pub use loader::{
    AddonPriceRecord, CabinetPriceRecord, CatalogLoader, CatalogLoaderError, DependencyRecord,
    SurfacePriceRecord, default_fenix_multiplier,
};
