//! Cabinet line pricing.
//!
//! A cabinet row is selected by the exact key (name, area, room_name,
//! measurement, handle_type). Rows keyed with [`HandleType::None`] form a
//! wildcard tier: they match any selected handle type, but an exact handle
//! match always wins over the wildcard.
//!
//! The unit price comes from the row's eleven-level price list at the
//! config's price level (levels above 10 clamp to the top tier), multiplied
//! by linear feet for footage-measured rows or by quantity for piece-counted
//! rows. The optional structural-upgrade surcharge contributes
//! `str_addon × measurement` on top and is reported separately so callers
//! may display it as its own component.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{CabinetConfig, CabinetPricingEntry, HandleType};

/// The priced components of one cabinet line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabinetPrice {
    /// Unit price at the selected level × measurement.
    pub base: Decimal,
    /// Structural-upgrade surcharge × measurement, when enabled.
    pub structural: Decimal,
}

impl CabinetPrice {
    pub const ZERO: CabinetPrice = CabinetPrice {
        base: Decimal::ZERO,
        structural: Decimal::ZERO,
    };

    /// What the cabinet contributes to the quote: base plus surcharge.
    pub fn total(&self) -> Decimal {
        self.base + self.structural
    }
}

/// Prices cabinet configs against the cabinet catalog table.
#[derive(Debug, Clone)]
pub struct CabinetPricer<'a> {
    entries: &'a [CabinetPricingEntry],
}

impl<'a> CabinetPricer<'a> {
    pub fn new(entries: &'a [CabinetPricingEntry]) -> Self {
        Self { entries }
    }

    /// Prices one cabinet config under the given handle selection.
    ///
    /// Catalog misses and non-positive measurements price to
    /// [`CabinetPrice::ZERO`]; neither is an error.
    pub fn price(
        &self,
        config: &CabinetConfig,
        handle_type: HandleType,
    ) -> CabinetPrice {
        let measured = config.measured_value();
        if measured <= Decimal::ZERO {
            return CabinetPrice::ZERO;
        }

        let Some(entry) = self.find_entry(config, handle_type) else {
            warn!(
                name = %config.name,
                area = %config.area,
                room = %config.room_name,
                handle = handle_type.as_str(),
                "no cabinet pricing row matches; line prices to zero"
            );
            return CabinetPrice::ZERO;
        };

        let base = round_half_up(entry.price_at_level(config.price_level) * measured);

        let structural = match entry.str_addon {
            Some(surcharge) if config.str_enabled => round_half_up(surcharge * measured),
            _ => Decimal::ZERO,
        };

        CabinetPrice { base, structural }
    }

    /// Exact handle match first, then the `HandleType::None` wildcard tier.
    fn find_entry(
        &self,
        config: &CabinetConfig,
        handle_type: HandleType,
    ) -> Option<&CabinetPricingEntry> {
        let key_matches = |entry: &&CabinetPricingEntry| {
            entry.name == config.name
                && entry.area == config.area
                && entry.room_name == config.room_name
                && entry.measurement == config.measurement
        };

        self.entries
            .iter()
            .filter(key_matches)
            .find(|entry| entry.handle_type == handle_type)
            .or_else(|| {
                self.entries
                    .iter()
                    .filter(key_matches)
                    .find(|entry| entry.handle_type == HandleType::None)
            })
    }
}
