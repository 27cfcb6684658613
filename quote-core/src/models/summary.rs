use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named, priced line of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// The priced result of one calculator run.
///
/// `total` is the dealer tier; the three markup fields are fixed multiples
/// of it (1.40 / 2.00 / 2.50).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub buffer: Decimal,
    pub tariff: Decimal,
    pub total: Decimal,
    pub trade_price: Decimal,
    pub retail_price_1: Decimal,
    pub retail_price_2: Decimal,
}

impl PricingSummary {
    /// A summary with no line items and every amount at zero.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            buffer: Decimal::ZERO,
            tariff: Decimal::ZERO,
            total: Decimal::ZERO,
            trade_price: Decimal::ZERO,
            retail_price_1: Decimal::ZERO,
            retail_price_2: Decimal::ZERO,
        }
    }
}
