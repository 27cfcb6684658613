//! Addon line pricing.
//!
//! An addon row is selected by the exact key (name, area, measurement).
//! The unit price multiplies linear feet for footage-measured rows or the
//! piece count for quantity rows. Dependent addons are priced through the
//! same path once the dependency resolver has derived their measurements.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{AddonConfig, AddonPricingEntry};

/// Prices addon configs against the addon catalog table.
#[derive(Debug, Clone)]
pub struct AddonPricer<'a> {
    entries: &'a [AddonPricingEntry],
}

impl<'a> AddonPricer<'a> {
    pub fn new(entries: &'a [AddonPricingEntry]) -> Self {
        Self { entries }
    }

    /// Prices one addon config, ignoring its dependents.
    ///
    /// Catalog misses and non-positive measurements price to zero; neither
    /// is an error.
    pub fn price(&self, config: &AddonConfig) -> Decimal {
        let measured = config.measured_value();
        if measured <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let Some(entry) = self.find_entry(config) else {
            warn!(
                name = %config.name,
                area = %config.area,
                "no addon pricing row matches; line prices to zero"
            );
            return Decimal::ZERO;
        };

        round_half_up(entry.unit_price * measured)
    }

    fn find_entry(&self, config: &AddonConfig) -> Option<&AddonPricingEntry> {
        self.entries.iter().find(|entry| {
            entry.name == config.name
                && entry.area == config.area
                && entry.measurement == config.measurement
        })
    }
}
