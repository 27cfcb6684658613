use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::handle::HandleType;
use super::material::Material;
use super::measurement::MeasurementKind;

/// Addon name that triggers the built-in transformer derivation.
pub const LED_LIGHTING: &str = "LED Lighting";
/// Addon name derived from LED strip footage.
pub const TRANSFORMER: &str = "Transformer";

/// Number of price levels carried per cabinet entry (levels 0 through 10).
pub const PRICE_LEVELS: usize = 11;

/// Collapses the known spellings of the kitchen surface area to one key.
///
/// `"kitchen-surfaces"`, `"kitchen-surface"` and `"kitchen"` all refer to the
/// same catalog rows; they are one area, not three.
pub fn normalize_area(area: &str) -> &str {
    match area {
        "kitchen-surfaces" | "kitchen-surface" | "kitchen" => "kitchen",
        other => other,
    }
}

/// How a derived dependent quantity is adjusted after applying the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingRule {
    None,
    RoundUp,
    RoundDown,
    RoundNearest,
}

impl RoundingRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::RoundUp => "round-up",
            Self::RoundDown => "round-down",
            Self::RoundNearest => "round-nearest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "round-up" => Some(Self::RoundUp),
            "round-down" => Some(Self::RoundDown),
            "round-nearest" => Some(Self::RoundNearest),
            _ => None,
        }
    }

    /// Applies the rule to a derived measurement.
    pub fn apply(&self, value: Decimal) -> Decimal {
        match self {
            Self::None => value,
            Self::RoundUp => value.ceil(),
            Self::RoundDown => value.floor(),
            Self::RoundNearest => {
                value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }
}

/// One priced cabinet row.
///
/// The row key is (name, area, room_name, measurement, handle_type); the value
/// is the eleven-level unit price list plus the optional structural-upgrade
/// surcharge per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinetPricingEntry {
    pub name: String,
    pub area: String,
    pub room_name: String,
    pub measurement: MeasurementKind,
    pub handle_type: HandleType,
    pub level_prices: [Decimal; PRICE_LEVELS],
    pub str_addon: Option<Decimal>,
}

impl CabinetPricingEntry {
    /// Unit price at the given level, clamping levels above the top tier.
    pub fn price_at_level(&self, level: u8) -> Decimal {
        let index = usize::from(level).min(PRICE_LEVELS - 1);
        self.level_prices[index]
    }
}

/// Per-material unit prices for one surface row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialPrices {
    pub laminate: Decimal,
    pub fenix: Decimal,
    pub porcelain: Decimal,
    pub quartz: Decimal,
    pub stainless: Decimal,
    pub glass_matte: Decimal,
    pub granite: Decimal,
}

impl MaterialPrices {
    /// Same unit price for every material.
    pub fn uniform(price: Decimal) -> Self {
        Self {
            laminate: price,
            fenix: price,
            porcelain: price,
            quartz: price,
            stainless: price,
            glass_matte: price,
            granite: price,
        }
    }

    pub fn price(&self, material: Material) -> Decimal {
        match material {
            Material::Laminate => self.laminate,
            Material::Fenix => self.fenix,
            Material::Porcelain => self.porcelain,
            Material::Quartz => self.quartz,
            Material::Stainless => self.stainless,
            Material::GlassMatte => self.glass_matte,
            Material::Granite => self.granite,
        }
    }
}

/// One priced surface row, keyed by (name, area, measurement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePricingEntry {
    pub name: String,
    pub area: String,
    pub measurement: MeasurementKind,
    pub prices: MaterialPrices,
}

/// One priced addon row, keyed by (name, area, measurement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonPricingEntry {
    pub name: String,
    pub area: String,
    pub measurement: MeasurementKind,
    pub unit_price: Decimal,
}

/// Relates a parent addon to a dependent whose quantity is derived from the
/// parent's measurement.
///
/// The full set of edges must form a forest; a cycle is a configuration error
/// surfaced by the dependency resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonDependency {
    pub parent: String,
    pub dependent: String,
    pub quantity_ratio: Decimal,
    pub rounding: RoundingRule,
}

impl AddonDependency {
    /// Built-in edges every catalog carries: one transformer per started
    /// three linear feet of LED strip, i.e. `ceil(led_linear_feet / 3)`.
    pub fn builtin() -> Vec<AddonDependency> {
        vec![AddonDependency {
            parent: LED_LIGHTING.to_string(),
            dependent: TRANSFORMER.to_string(),
            quantity_ratio: Decimal::ONE / Decimal::from(3),
            rounding: RoundingRule::RoundUp,
        }]
    }
}

/// The three pricing tables plus the addon dependency set.
///
/// A catalog is a read-only snapshot for the duration of one pricing call;
/// lookups are exact key matches apart from the surface area synonyms handled
/// by [`normalize_area`] and the cabinet handle wildcard tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingCatalog {
    pub cabinets: Vec<CabinetPricingEntry>,
    pub surfaces: Vec<SurfacePricingEntry>,
    pub addons: Vec<AddonPricingEntry>,
    pub dependencies: Vec<AddonDependency>,
}

impl PricingCatalog {
    /// Assembles a catalog, appending any built-in dependency edge not
    /// already overridden by the supplied set.
    pub fn new(
        cabinets: Vec<CabinetPricingEntry>,
        surfaces: Vec<SurfacePricingEntry>,
        addons: Vec<AddonPricingEntry>,
        mut dependencies: Vec<AddonDependency>,
    ) -> Self {
        for builtin in AddonDependency::builtin() {
            let overridden = dependencies
                .iter()
                .any(|d| d.parent == builtin.parent && d.dependent == builtin.dependent);
            if !overridden {
                dependencies.push(builtin);
            }
        }

        Self {
            cabinets,
            surfaces,
            addons,
            dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // normalize_area tests
    // =========================================================================

    #[test]
    fn normalize_area_collapses_kitchen_synonyms() {
        assert_eq!(normalize_area("kitchen-surfaces"), "kitchen");
        assert_eq!(normalize_area("kitchen-surface"), "kitchen");
        assert_eq!(normalize_area("kitchen"), "kitchen");
    }

    #[test]
    fn normalize_area_leaves_other_areas_alone() {
        assert_eq!(normalize_area("island"), "island");
        assert_eq!(normalize_area("laundry"), "laundry");
    }

    // =========================================================================
    // RoundingRule tests
    // =========================================================================

    #[test]
    fn rounding_rule_round_trips_through_codes() {
        for rule in [
            RoundingRule::None,
            RoundingRule::RoundUp,
            RoundingRule::RoundDown,
            RoundingRule::RoundNearest,
        ] {
            assert_eq!(RoundingRule::parse(rule.as_str()), Some(rule));
        }
    }

    #[test]
    fn rounding_rule_none_is_identity() {
        assert_eq!(RoundingRule::None.apply(dec!(2.4)), dec!(2.4));
    }

    #[test]
    fn rounding_rule_up_takes_ceiling() {
        assert_eq!(RoundingRule::RoundUp.apply(dec!(2.1)), dec!(3));
        assert_eq!(RoundingRule::RoundUp.apply(dec!(2.0)), dec!(2));
    }

    #[test]
    fn rounding_rule_down_takes_floor() {
        assert_eq!(RoundingRule::RoundDown.apply(dec!(2.9)), dec!(2));
    }

    #[test]
    fn rounding_rule_nearest_rounds_midpoint_away_from_zero() {
        assert_eq!(RoundingRule::RoundNearest.apply(dec!(2.5)), dec!(3));
        assert_eq!(RoundingRule::RoundNearest.apply(dec!(2.4)), dec!(2));
    }

    // =========================================================================
    // CabinetPricingEntry tests
    // =========================================================================

    fn cabinet_entry() -> CabinetPricingEntry {
        CabinetPricingEntry {
            name: "Base Cabinet".to_string(),
            area: "kitchen".to_string(),
            room_name: "Kitchen".to_string(),
            measurement: MeasurementKind::LinearFoot,
            handle_type: HandleType::Profile,
            level_prices: [
                dec!(100),
                dec!(110),
                dec!(120),
                dec!(130),
                dec!(140),
                dec!(150),
                dec!(160),
                dec!(170),
                dec!(180),
                dec!(190),
                dec!(200),
            ],
            str_addon: Some(dec!(15)),
        }
    }

    #[test]
    fn price_at_level_indexes_the_level_list() {
        let entry = cabinet_entry();

        assert_eq!(entry.price_at_level(0), dec!(100));
        assert_eq!(entry.price_at_level(10), dec!(200));
    }

    #[test]
    fn price_at_level_clamps_levels_above_the_top_tier() {
        let entry = cabinet_entry();

        assert_eq!(entry.price_at_level(11), dec!(200));
        assert_eq!(entry.price_at_level(u8::MAX), dec!(200));
    }

    // =========================================================================
    // MaterialPrices tests
    // =========================================================================

    #[test]
    fn uniform_prices_every_material_the_same() {
        let prices = MaterialPrices::uniform(dec!(50));

        for material in Material::ALL {
            assert_eq!(prices.price(material), dec!(50));
        }
    }

    #[test]
    fn price_selects_the_requested_material() {
        let prices = MaterialPrices {
            fenix: dec!(75),
            ..MaterialPrices::uniform(dec!(50))
        };

        assert_eq!(prices.price(Material::Fenix), dec!(75));
        assert_eq!(prices.price(Material::Laminate), dec!(50));
    }

    // =========================================================================
    // PricingCatalog tests
    // =========================================================================

    #[test]
    fn new_seeds_the_led_transformer_edge() {
        let catalog = PricingCatalog::new(vec![], vec![], vec![], vec![]);

        let edge = catalog
            .dependencies
            .iter()
            .find(|d| d.parent == LED_LIGHTING && d.dependent == TRANSFORMER)
            .expect("built-in LED edge missing");

        assert_eq!(edge.rounding, RoundingRule::RoundUp);
        // One per started three feet: 7 lf -> ceil(7/3) = 3.
        assert_eq!(edge.rounding.apply(dec!(7) * edge.quantity_ratio), dec!(3));
    }

    #[test]
    fn new_keeps_a_supplied_override_of_a_builtin_edge() {
        let override_edge = AddonDependency {
            parent: LED_LIGHTING.to_string(),
            dependent: TRANSFORMER.to_string(),
            quantity_ratio: dec!(0.25),
            rounding: RoundingRule::RoundNearest,
        };

        let catalog = PricingCatalog::new(vec![], vec![], vec![], vec![override_edge.clone()]);

        let edges: Vec<_> = catalog
            .dependencies
            .iter()
            .filter(|d| d.parent == LED_LIGHTING && d.dependent == TRANSFORMER)
            .collect();
        assert_eq!(edges, vec![&override_edge]);
    }
}
