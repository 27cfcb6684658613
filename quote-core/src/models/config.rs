use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::handle::HandleType;
use super::material::Material;
use super::measurement::MeasurementKind;

/// One configured cabinet run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinetConfig {
    pub name: String,
    pub area: String,
    pub room_name: String,
    pub measurement: MeasurementKind,
    pub linear_feet: Decimal,
    pub quantity: Decimal,
    /// Price level 0–10; values above 10 are clamped to the top tier.
    pub price_level: u8,
    /// Adds the per-unit structural-upgrade surcharge when the catalog row
    /// carries one.
    pub str_enabled: bool,
}

impl CabinetConfig {
    /// The numeric field the unit price multiplies, chosen by measurement kind.
    pub fn measured_value(&self) -> Decimal {
        if self.measurement.uses_footage() {
            self.linear_feet
        } else {
            self.quantity
        }
    }
}

/// One configured counter-top or backsplash surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub name: String,
    pub area: String,
    pub measurement: MeasurementKind,
    pub material: Material,
    pub square_feet: Decimal,
}

/// One configured addon.
///
/// `dependents` holds entries whose quantities are derived from this addon's
/// measurement by the dependency resolver; they are never user-edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonConfig {
    pub name: String,
    pub area: String,
    pub measurement: MeasurementKind,
    pub linear_feet: Decimal,
    pub quantity: Decimal,
    pub dependents: Vec<AddonConfig>,
}

impl AddonConfig {
    pub fn measured_value(&self) -> Decimal {
        if self.measurement.uses_footage() {
            self.linear_feet
        } else {
            self.quantity
        }
    }

    /// Overwrites whichever field this addon is measured by.
    pub fn set_measured_value(&mut self, value: Decimal) {
        if self.measurement.uses_footage() {
            self.linear_feet = value;
        } else {
            self.quantity = value;
        }
    }
}

/// An island composite: its cabinets share one price level and handle type,
/// and the optional waterfall mirrors the counter top's material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandConfig {
    pub price_level: u8,
    pub handle_type: HandleType,
    pub counter_top: SurfaceConfig,
    pub waterfall: Option<SurfaceConfig>,
    pub aluminum_profile: Option<AddonConfig>,
    pub toe_kick: Option<AddonConfig>,
    pub sink: Option<AddonConfig>,
    pub cabinets: Vec<CabinetConfig>,
}

/// The full calculator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub handle_type: HandleType,
    pub cabinets: Vec<CabinetConfig>,
    pub surfaces: Vec<SurfaceConfig>,
    pub addons: Vec<AddonConfig>,
    pub island: Option<IslandConfig>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            handle_type: HandleType::None,
            cabinets: Vec::new(),
            surfaces: Vec::new(),
            addons: Vec::new(),
            island: None,
        }
    }
}
