use serde::{Deserialize, Serialize};

/// How a catalog entry is measured, and therefore which numeric field of a
/// configuration entry multiplies the unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    LinearFoot,
    SquareFoot,
    Quantity,
}

impl MeasurementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinearFoot => "LNFT",
            Self::SquareFoot => "SQFT",
            Self::Quantity => "QTY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LNFT" => Some(Self::LinearFoot),
            "SQFT" => Some(Self::SquareFoot),
            "QTY" => Some(Self::Quantity),
            _ => None,
        }
    }

    /// Linear- and square-foot entries are priced off the footage field;
    /// quantity entries off the piece count.
    pub fn uses_footage(&self) -> bool {
        matches!(self, Self::LinearFoot | Self::SquareFoot)
    }
}
