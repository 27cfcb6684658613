use serde::{Deserialize, Serialize};

/// Cabinet front hardware selection.
///
/// Catalog rows keyed with [`HandleType::None`] are a wildcard tier: they
/// match whatever handle type the configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleType {
    None,
    Handle,
    Profile,
}

impl HandleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Handle => "handle",
            Self::Profile => "profile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "handle" => Some(Self::Handle),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }
}
