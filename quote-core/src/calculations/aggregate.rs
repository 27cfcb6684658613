//! Quote aggregation: from a full configuration to a priced summary.
//!
//! This module drives the per-category pricers over every configured entity
//! and folds the results into one [`PricingSummary`] through the markup
//! cascade:
//!
//! | Step             | Amount                                   |
//! |------------------|------------------------------------------|
//! | subtotal         | Σ line-item prices                       |
//! | buffer           | subtotal × contingency rate (default 5%) |
//! | tariff           | (subtotal + buffer) × tariff rate (10%)  |
//! | total (dealer)   | subtotal + buffer + tariff               |
//! | trade price      | total × 1.40                             |
//! | retail price 1   | total × 2.00                             |
//! | retail price 2   | total × 2.50                             |
//!
//! Catalog misses and non-positive measurements degrade to omitted lines and
//! never error; only invalid rates and a dependency cycle fail the call.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::QuoteCalculator;
//! use quote_core::models::{
//!     CabinetConfig, CabinetPricingEntry, CalculatorConfig, HandleType, MeasurementKind,
//!     PricingCatalog, QuoteRates,
//! };
//!
//! let catalog = PricingCatalog::new(
//!     vec![CabinetPricingEntry {
//!         name: "Base Cabinet".to_string(),
//!         area: "kitchen".to_string(),
//!         room_name: "Kitchen".to_string(),
//!         measurement: MeasurementKind::LinearFoot,
//!         handle_type: HandleType::None,
//!         level_prices: [dec!(100); 11],
//!         str_addon: None,
//!     }],
//!     vec![],
//!     vec![],
//!     vec![],
//! );
//!
//! let config = CalculatorConfig {
//!     cabinets: vec![CabinetConfig {
//!         name: "Base Cabinet".to_string(),
//!         area: "kitchen".to_string(),
//!         room_name: "Kitchen".to_string(),
//!         measurement: MeasurementKind::LinearFoot,
//!         linear_feet: dec!(5),
//!         quantity: dec!(0),
//!         price_level: 0,
//!         str_enabled: false,
//!     }],
//!     ..CalculatorConfig::default()
//! };
//!
//! let calculator = QuoteCalculator::new(&catalog, QuoteRates::default());
//! let summary = calculator.calculate(&config).unwrap();
//!
//! assert_eq!(summary.subtotal, dec!(500));
//! assert_eq!(summary.total, dec!(577.50));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::dependency::{DependencyError, DependencyResolver};
use crate::calculations::pricers::{AddonPricer, CabinetPricer, SurfacePricer};
use crate::models::{
    CalculatorConfig, IslandConfig, LineItem, PricingCatalog, PricingSummary, QuoteRates,
    RatesError,
};

/// Errors from pricing a full configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error(transparent)]
    Rates(#[from] RatesError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

/// Prices a configuration against a catalog snapshot.
///
/// This is the explicit, pure entry point: the same inputs always produce
/// the same summary, and nothing is recomputed behind the caller's back.
pub fn price_configuration(
    config: &CalculatorConfig,
    catalog: &PricingCatalog,
    rates: &QuoteRates,
) -> Result<PricingSummary, QuoteError> {
    QuoteCalculator::new(catalog, *rates).calculate(config)
}

/// Calculator folding every configured entity into one [`PricingSummary`].
#[derive(Debug, Clone)]
pub struct QuoteCalculator<'a> {
    catalog: &'a PricingCatalog,
    rates: QuoteRates,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(catalog: &'a PricingCatalog, rates: QuoteRates) -> Self {
        Self { catalog, rates }
    }

    /// Prices the full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] if a rate is negative or the addon dependency
    /// set contains a cycle. Catalog misses never error.
    pub fn calculate(&self, config: &CalculatorConfig) -> Result<PricingSummary, QuoteError> {
        self.rates.validate()?;

        let mut items = Vec::new();

        self.append_cabinet_lines(config, &mut items);
        self.append_surface_lines(config, &mut items);
        self.append_addon_lines(config, &mut items)?;
        if let Some(island) = &config.island {
            self.append_island_lines(island, &mut items);
        }

        Ok(self.summarize(items))
    }

    fn append_cabinet_lines(
        &self,
        config: &CalculatorConfig,
        items: &mut Vec<LineItem>,
    ) {
        let pricer = CabinetPricer::new(&self.catalog.cabinets);

        for cabinet in &config.cabinets {
            let price = pricer.price(cabinet, config.handle_type).total();
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!("{} ({})", cabinet.name, cabinet.area),
                    price,
                ));
            }
        }
    }

    fn append_surface_lines(
        &self,
        config: &CalculatorConfig,
        items: &mut Vec<LineItem>,
    ) {
        let pricer = SurfacePricer::new(&self.catalog.surfaces);

        for surface in &config.surfaces {
            let price = pricer.price(surface);
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!(
                        "{} - {} ({})",
                        surface.name,
                        surface.material.as_str(),
                        surface.area
                    ),
                    price,
                ));
            }
        }
    }

    /// Dependent addon lines are appended at price zero: their quantities are
    /// shown for visibility, while their cost stays embedded in the parent's
    /// pricing convention.
    fn append_addon_lines(
        &self,
        config: &CalculatorConfig,
        items: &mut Vec<LineItem>,
    ) -> Result<(), QuoteError> {
        let pricer = AddonPricer::new(&self.catalog.addons);
        let resolver = DependencyResolver::new(&self.catalog.dependencies);

        for addon in &config.addons {
            let price = pricer.price(addon);
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!("{} ({})", addon.name, addon.area),
                    price,
                ));

                for resolved in resolver.resolve(addon)? {
                    items.push(LineItem::new(
                        format!("{} ({})", resolved.config.name, resolved.config.area),
                        Decimal::ZERO,
                    ));
                }
            }
        }

        Ok(())
    }

    fn append_island_lines(
        &self,
        island: &IslandConfig,
        items: &mut Vec<LineItem>,
    ) {
        let cabinet_pricer = CabinetPricer::new(&self.catalog.cabinets);
        let surface_pricer = SurfacePricer::new(&self.catalog.surfaces);
        let addon_pricer = AddonPricer::new(&self.catalog.addons);

        // The island run has no measured length of its own; approximate its
        // linear feet as half the counter-top square footage.
        let island_feet = island.counter_top.square_feet / Decimal::TWO;

        for cabinet in &island.cabinets {
            let mut scoped = cabinet.clone();
            scoped.linear_feet = island_feet;
            scoped.price_level = island.price_level;

            let price = cabinet_pricer.price(&scoped, island.handle_type).total();
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!("Island {} ({})", scoped.name, scoped.area),
                    price,
                ));
            }
        }

        let counter_price = surface_pricer.price(&island.counter_top);
        if counter_price > Decimal::ZERO {
            items.push(LineItem::new(
                format!(
                    "Island {} - {} ({})",
                    island.counter_top.name,
                    island.counter_top.material.as_str(),
                    island.counter_top.area
                ),
                counter_price,
            ));
        }

        if let Some(waterfall) = &island.waterfall {
            // The waterfall always runs in the counter top's material.
            let mut mirrored = waterfall.clone();
            mirrored.material = island.counter_top.material;

            let price = surface_pricer.price(&mirrored);
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!(
                        "Island {} - {} ({})",
                        mirrored.name,
                        mirrored.material.as_str(),
                        mirrored.area
                    ),
                    price,
                ));
            }
        }

        for addon in [&island.aluminum_profile, &island.toe_kick, &island.sink]
            .into_iter()
            .flatten()
        {
            let price = addon_pricer.price(addon);
            if price > Decimal::ZERO {
                items.push(LineItem::new(
                    format!("Island {} ({})", addon.name, addon.area),
                    price,
                ));
            }
        }
    }

    /// Folds the line items through the buffer/tariff/markup cascade.
    ///
    /// All four tiers are exact decimal products of the dealer total, so
    /// `total = subtotal × (1 + contingency) × (1 + tariff)` holds exactly.
    fn summarize(&self, items: Vec<LineItem>) -> PricingSummary {
        let subtotal: Decimal = items.iter().map(|item| item.price).sum();
        let buffer = subtotal * self.rates.contingency_rate;
        let tariff = (subtotal + buffer) * self.rates.tariff_rate;
        let total = subtotal + buffer + tariff;

        PricingSummary {
            items,
            subtotal,
            buffer,
            tariff,
            total,
            trade_price: total * Decimal::new(140, 2),
            retail_price_1: total * Decimal::TWO,
            retail_price_2: total * Decimal::new(250, 2),
        }
    }
}
