//! Layout options and their documented defaults.
//!
//! Options arrive from hosts and JSON files that are not always well-formed. Instead of
//! rejecting them, every field falls back to its default when it is missing, non-numeric,
//! non-finite or out of range ([`LayoutOptions::sanitized`]).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_NODESEP: f64 = 50.0;
pub const DEFAULT_RANKSEP: f64 = 50.0;
pub const DEFAULT_MARGINX: f64 = 20.0;
pub const DEFAULT_MARGINY: f64 = 20.0;
pub const DEFAULT_ITERATIONS: usize = 4;
pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::TB => "TB",
            RankDir::BT => "BT",
            RankDir::LR => "LR",
            RankDir::RL => "RL",
        }
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRankDirError(pub String);

impl fmt::Display for ParseRankDirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rankdir `{}` (expected TB, BT, LR or RL)", self.0)
    }
}

impl std::error::Error for ParseRankDirError {}

impl FromStr for RankDir {
    type Err = ParseRankDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(ParseRankDirError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for RankDir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub rankdir: RankDir,
    #[serde(deserialize_with = "lenient_f64")]
    pub nodesep: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ranksep: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub marginx: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub marginy: f64,
    #[serde(deserialize_with = "lenient_usize")]
    pub iterations: usize,
    /// Gap between packed components; `None` uses `nodesep`.
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub componentsep: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: DEFAULT_NODESEP,
            ranksep: DEFAULT_RANKSEP,
            marginx: DEFAULT_MARGINX,
            marginy: DEFAULT_MARGINY,
            iterations: DEFAULT_ITERATIONS,
            componentsep: None,
        }
    }
}

impl LayoutOptions {
    /// Replaces every invalid field with its default.
    pub fn sanitized(&self) -> LayoutOptions {
        let nodesep = spacing_or(self.nodesep, DEFAULT_NODESEP, "nodesep");
        LayoutOptions {
            rankdir: self.rankdir,
            nodesep,
            ranksep: spacing_or(self.ranksep, DEFAULT_RANKSEP, "ranksep"),
            marginx: spacing_or(self.marginx, DEFAULT_MARGINX, "marginx"),
            marginy: spacing_or(self.marginy, DEFAULT_MARGINY, "marginy"),
            iterations: if self.iterations == 0 {
                tracing::warn!(default = DEFAULT_ITERATIONS, "invalid iterations; using default");
                DEFAULT_ITERATIONS
            } else {
                self.iterations
            },
            componentsep: self
                .componentsep
                .map(|gap| spacing_or(gap, nodesep, "componentsep")),
        }
    }

    /// Effective gap between packed components.
    pub fn component_gap(&self) -> f64 {
        self.componentsep.unwrap_or(self.nodesep)
    }
}

fn spacing_or(value: f64, default: f64, name: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        return value;
    }
    tracing::warn!(option = name, value, default, "invalid spacing; using default");
    default
}

/// Width/height fallback for missing or degenerate node geometry.
pub fn node_size_or_default(width: f64, height: f64) -> (f64, f64) {
    let width = if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_NODE_WIDTH
    };
    let height = if height.is_finite() && height > 0.0 {
        height
    } else {
        DEFAULT_NODE_HEIGHT
    };
    (width, height)
}

// Non-numeric values deserialize to NaN so `sanitized` can swap in the default.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(f64::NAN))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        other => Some(other.as_f64().unwrap_or(f64::NAN)),
    })
}

fn lenient_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 1.0)
                .map(|f| f.floor() as u64)
        })
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0))
}
