use serde::{Deserialize, Serialize};

/// Counter-top / backsplash surface material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Laminate,
    Fenix,
    Porcelain,
    Quartz,
    Stainless,
    GlassMatte,
    Granite,
}

impl Material {
    pub const ALL: [Material; 7] = [
        Self::Laminate,
        Self::Fenix,
        Self::Porcelain,
        Self::Quartz,
        Self::Stainless,
        Self::GlassMatte,
        Self::Granite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Laminate => "laminate",
            Self::Fenix => "fenix",
            Self::Porcelain => "porcelain",
            Self::Quartz => "quartz",
            Self::Stainless => "stainless",
            Self::GlassMatte => "glass-matte",
            Self::Granite => "granite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "laminate" => Some(Self::Laminate),
            "fenix" => Some(Self::Fenix),
            "porcelain" => Some(Self::Porcelain),
            "quartz" => Some(Self::Quartz),
            "stainless" => Some(Self::Stainless),
            "glass-matte" => Some(Self::GlassMatte),
            "granite" => Some(Self::Granite),
            _ => None,
        }
    }
}
