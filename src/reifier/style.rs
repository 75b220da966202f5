use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy deciding whether quadlets added to a graph are intercepted by the
/// reifier and whether the reifier's quadlets show up in ordinary finds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReificationStyle {
    /// Quadlets are plain triples; reifications live only in the reifier
    #[default]
    Minimal,
    /// Quadlets are intercepted and stay visible
    Standard,
    /// Quadlets are intercepted and hidden
    Convenient,
}

impl ReificationStyle {
    /// All styles
    pub const ALL: [ReificationStyle; 3] = [
        ReificationStyle::Minimal,
        ReificationStyle::Standard,
        ReificationStyle::Convenient,
    ];

    pub const fn intercepts(self) -> bool {
        !matches!(self, ReificationStyle::Minimal)
    }

    pub const fn conceals(self) -> bool {
        !matches!(self, ReificationStyle::Standard)
    }

    pub fn name(self) -> &'static str {
        match self {
            ReificationStyle::Minimal => "minimal",
            ReificationStyle::Standard => "standard",
            ReificationStyle::Convenient => "convenient",
        }
    }
}

impl fmt::Display for ReificationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReificationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReificationStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown reification style: {}", s))
    }
}
