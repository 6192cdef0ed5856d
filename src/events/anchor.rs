// Anchor rule abstraction
// Selects which above-mean candidate anchors a detected event

use serde::{Deserialize, Serialize};

use crate::events::types::EventPoint;

/// Rule deciding which candidate becomes the event anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorRule {
    /// Historical rule: the first candidate whose velocity exceeds the mean
    /// absolute slope across candidates. Velocity and slope carry different
    /// units; existing catalogs were produced with this comparison, so it
    /// stays the default.
    VelocityOverMeanSlope,

    /// Unit-consistent alternative: the first candidate whose incoming
    /// slope, measured from the previous candidate, exceeds the mean slope.
    /// The first candidate has no incoming slope and never qualifies.
    LocalSlopeOverMeanSlope,
}

impl Default for AnchorRule {
    fn default() -> Self {
        AnchorRule::VelocityOverMeanSlope
    }
}

impl AnchorRule {
    /// Parse from string representation (for CLI and serialization)
    /// Accepts both PascalCase and snake_case
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "VelocityOverMeanSlope" | "velocity_over_mean_slope" => {
                Some(AnchorRule::VelocityOverMeanSlope)
            }
            "LocalSlopeOverMeanSlope" | "local_slope_over_mean_slope" => {
                Some(AnchorRule::LocalSlopeOverMeanSlope)
            }
            _ => None,
        }
    }

    /// String representation (snake_case for CLI display)
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorRule::VelocityOverMeanSlope => "velocity_over_mean_slope",
            AnchorRule::LocalSlopeOverMeanSlope => "local_slope_over_mean_slope",
        }
    }

    /// Whether the candidate at `index` anchors the event
    pub fn qualifies(&self, candidates: &[EventPoint], index: usize, mean_slope: f64) -> bool {
        match self {
            AnchorRule::VelocityOverMeanSlope => candidates[index].velocity > mean_slope,
            AnchorRule::LocalSlopeOverMeanSlope => {
                if index == 0 {
                    return false;
                }
                let prev = candidates[index - 1];
                let curr = candidates[index];
                let dt = curr.time - prev.time;

                // Guard against a zero time step
                if dt == 0.0 {
                    return false;
                }

                ((curr.velocity - prev.velocity) / dt).abs() > mean_slope
            }
        }
    }
}
