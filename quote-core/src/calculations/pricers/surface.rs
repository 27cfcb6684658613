//! Surface line pricing.
//!
//! A surface row is selected by (name, area, measurement), where the area
//! field tolerates the known kitchen spellings via
//! [`crate::models::normalize_area`]. The unit price is the row's price for
//! the configured material, multiplied by square feet.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{SurfaceConfig, SurfacePricingEntry, normalize_area};

/// Prices surface configs against the surface catalog table.
#[derive(Debug, Clone)]
pub struct SurfacePricer<'a> {
    entries: &'a [SurfacePricingEntry],
}

impl<'a> SurfacePricer<'a> {
    pub fn new(entries: &'a [SurfacePricingEntry]) -> Self {
        Self { entries }
    }

    /// Prices one surface config.
    ///
    /// Catalog misses and non-positive square footage price to zero; neither
    /// is an error.
    pub fn price(&self, config: &SurfaceConfig) -> Decimal {
        if config.square_feet <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let Some(entry) = self.find_entry(config) else {
            warn!(
                name = %config.name,
                area = %config.area,
                material = config.material.as_str(),
                "no surface pricing row matches; line prices to zero"
            );
            return Decimal::ZERO;
        };

        round_half_up(entry.prices.price(config.material) * config.square_feet)
    }

    fn find_entry(&self, config: &SurfaceConfig) -> Option<&SurfacePricingEntry> {
        let area = normalize_area(&config.area);
        self.entries.iter().find(|entry| {
            entry.name == config.name
                && normalize_area(&entry.area) == area
                && entry.measurement == config.measurement
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{Material, MaterialPrices, MeasurementKind};

    use super::*;

    fn entry(area: &str) -> SurfacePricingEntry {
        SurfacePricingEntry {
            name: "Counter Top".to_string(),
            area: area.to_string(),
            measurement: MeasurementKind::SquareFoot,
            prices: MaterialPrices {
                fenix: dec!(75),
                ..MaterialPrices::uniform(dec!(50))
            },
        }
    }

    fn config(area: &str) -> SurfaceConfig {
        SurfaceConfig {
            name: "Counter Top".to_string(),
            area: area.to_string(),
            measurement: MeasurementKind::SquareFoot,
            material: Material::Laminate,
            square_feet: dec!(10),
        }
    }

    #[test]
    fn prices_unit_price_times_square_feet() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        assert_eq!(pricer.price(&config("kitchen")), dec!(500));
    }

    #[test]
    fn selects_the_configured_material() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        let surface = SurfaceConfig {
            material: Material::Fenix,
            ..config("kitchen")
        };

        assert_eq!(pricer.price(&surface), dec!(750));
    }

    #[test]
    fn kitchen_area_synonyms_hit_the_same_row() {
        let entries = vec![entry("kitchen-surfaces")];
        let pricer = SurfacePricer::new(&entries);

        assert_eq!(pricer.price(&config("kitchen")), dec!(500));
        assert_eq!(pricer.price(&config("kitchen-surface")), dec!(500));
        assert_eq!(pricer.price(&config("kitchen-surfaces")), dec!(500));
    }

    #[test]
    fn non_kitchen_areas_still_match_exactly() {
        let entries = vec![entry("laundry")];
        let pricer = SurfacePricer::new(&entries);

        assert_eq!(pricer.price(&config("laundry")), dec!(500));
        assert_eq!(pricer.price(&config("pantry")), dec!(0));
    }

    #[test]
    fn catalog_miss_prices_to_zero() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        let surface = SurfaceConfig {
            name: "Backsplash".to_string(),
            ..config("kitchen")
        };

        assert_eq!(pricer.price(&surface), dec!(0));
    }

    #[test]
    fn zero_square_feet_prices_to_zero() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        let surface = SurfaceConfig {
            square_feet: dec!(0),
            ..config("kitchen")
        };

        assert_eq!(pricer.price(&surface), dec!(0));
    }

    #[test]
    fn negative_square_feet_prices_to_zero() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        let surface = SurfaceConfig {
            square_feet: dec!(-2),
            ..config("kitchen")
        };

        assert_eq!(pricer.price(&surface), dec!(0));
    }

    #[test]
    fn rounds_fractional_footage_to_cents() {
        let entries = vec![entry("kitchen")];
        let pricer = SurfacePricer::new(&entries);

        let surface = SurfaceConfig {
            square_feet: dec!(10.555),
            ..config("kitchen")
        };

        // 50 × 10.555 = 527.75
        assert_eq!(pricer.price(&surface), dec!(527.75));
    }
}
