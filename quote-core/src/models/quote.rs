use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::CalculatorConfig;
use super::summary::PricingSummary;

/// A persisted quote: customer identity plus the configuration snapshot and
/// the summary computed from it. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub config: CalculatorConfig,
    pub summary: PricingSummary,
}

/// For creating new quotes (no id or timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub config: CalculatorConfig,
    pub summary: PricingSummary,
}
