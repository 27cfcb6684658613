//! Derived-quantity resolution for dependent addons.
//!
//! A dependency edge defines a dependent addon whose measurement is a ratio
//! of its parent's, adjusted by a rounding rule:
//!
//! ```text
//! derived = apply(rounding, parent_measurement × quantity_ratio)
//! ```
//!
//! The derived value replaces the dependent's linear-feet-or-quantity field
//! (chosen by the dependent's own measurement kind). Edges form a forest;
//! resolution walks it with a visited set and reports any revisited addon as
//! a fatal [`DependencyError::CycleDetected`] rather than recursing forever.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AddonConfig, AddonDependency, MeasurementKind};

/// Errors from dependency resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DependencyError {
    /// The dependency set is not a forest.
    #[error("addon dependency cycle detected: '{parent}' -> '{dependent}'")]
    CycleDetected { parent: String, dependent: String },
}

/// A dependent addon with its derived measurement written in, ready for the
/// addon pricer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddon {
    pub config: AddonConfig,
    pub derived_value: Decimal,
}

/// Resolves dependent addon quantities against the dependency edge set.
#[derive(Debug, Clone)]
pub struct DependencyResolver<'a> {
    edges: &'a [AddonDependency],
}

impl<'a> DependencyResolver<'a> {
    pub fn new(edges: &'a [AddonDependency]) -> Self {
        Self { edges }
    }

    /// Computes one edge's derived measurement from the parent's.
    pub fn derive(
        edge: &AddonDependency,
        parent_measurement: Decimal,
    ) -> Decimal {
        edge.rounding.apply(parent_measurement * edge.quantity_ratio)
    }

    /// Walks every dependency below `parent` and returns the dependents in
    /// resolution order, each with its derived measurement applied.
    ///
    /// Dependent configs carried on the parent supply the catalog identity
    /// (area, measurement kind); when an edge has no matching carried entry,
    /// one is synthesized with the parent's area and quantity measurement, so
    /// automatic derivations apply without UI-maintained dependent entries.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::CycleDetected`] if any addon is reachable
    /// twice.
    pub fn resolve(&self, parent: &AddonConfig) -> Result<Vec<ResolvedAddon>, DependencyError> {
        let mut visited = HashSet::new();
        visited.insert(parent.name.clone());

        let mut resolved = Vec::new();
        self.resolve_into(parent, parent.measured_value(), &mut visited, &mut resolved)?;
        Ok(resolved)
    }

    fn resolve_into(
        &self,
        parent: &AddonConfig,
        parent_value: Decimal,
        visited: &mut HashSet<String>,
        resolved: &mut Vec<ResolvedAddon>,
    ) -> Result<(), DependencyError> {
        for edge in self.edges.iter().filter(|e| e.parent == parent.name) {
            if !visited.insert(edge.dependent.clone()) {
                return Err(DependencyError::CycleDetected {
                    parent: parent.name.clone(),
                    dependent: edge.dependent.clone(),
                });
            }

            let mut dependent = parent
                .dependents
                .iter()
                .find(|d| d.name == edge.dependent)
                .cloned()
                .unwrap_or_else(|| AddonConfig {
                    name: edge.dependent.clone(),
                    area: parent.area.clone(),
                    measurement: MeasurementKind::Quantity,
                    linear_feet: Decimal::ZERO,
                    quantity: Decimal::ZERO,
                    dependents: Vec::new(),
                });

            let derived = Self::derive(edge, parent_value);
            dependent.set_measured_value(derived);

            resolved.push(ResolvedAddon {
                config: dependent.clone(),
                derived_value: derived,
            });

            self.resolve_into(&dependent, derived, visited, resolved)?;
        }

        Ok(())
    }
}
