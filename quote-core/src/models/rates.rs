use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for out-of-range aggregation rates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatesError {
    /// The contingency rate must be non-negative.
    #[error("contingency rate must be non-negative, got {0}")]
    NegativeContingencyRate(Decimal),

    /// The tariff rate must be non-negative.
    #[error("tariff rate must be non-negative, got {0}")]
    NegativeTariffRate(Decimal),
}

/// Percentage rates applied on top of the line-item subtotal.
///
/// The markup tiers (trade/retail) are fixed multipliers of the dealer total
/// and are not part of this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRates {
    /// Contingency buffer applied to the subtotal. Default 5%.
    pub contingency_rate: Decimal,
    /// Tariff applied after the contingency buffer. Default 10%.
    pub tariff_rate: Decimal,
}

impl Default for QuoteRates {
    fn default() -> Self {
        Self {
            contingency_rate: Decimal::new(5, 2),
            tariff_rate: Decimal::new(10, 2),
        }
    }
}

impl QuoteRates {
    /// # Errors
    ///
    /// Returns [`RatesError`] if either rate is negative.
    pub fn validate(&self) -> Result<(), RatesError> {
        if self.contingency_rate < Decimal::ZERO {
            return Err(RatesError::NegativeContingencyRate(self.contingency_rate));
        }
        if self.tariff_rate < Decimal::ZERO {
            return Err(RatesError::NegativeTariffRate(self.tariff_rate));
        }
        Ok(())
    }
}
