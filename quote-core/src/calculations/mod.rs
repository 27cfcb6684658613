//! Pricing calculations for the cabinet quote engine.
//!
//! The entry point is [`QuoteCalculator`], which drives the per-category
//! pricers and the dependency resolver and folds their results into one
//! [`crate::models::PricingSummary`].

pub mod aggregate;
pub mod common;
pub mod dependency;
pub mod pricers;

pub use aggregate::{QuoteCalculator, QuoteError, price_configuration};
pub use dependency::{DependencyError, DependencyResolver, ResolvedAddon};
pub use pricers::{AddonPricer, CabinetPrice, CabinetPricer, SurfacePricer};
