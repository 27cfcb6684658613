//! Per-category line-item pricers.
//!
//! Each pricer maps one configuration entry plus its catalog table to a
//! dollar amount. Catalog misses and non-positive measurements price to
//! zero and never error; the aggregator drops zero-priced lines.

pub mod addon;
pub mod cabinet;
pub mod surface;

pub use addon::AddonPricer;
pub use cabinet::{CabinetPrice, CabinetPricer};
pub use surface::SurfacePricer;
