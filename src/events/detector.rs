// Slope-threshold event detection
// Finds the event anchor among above-mean samples and collects its
// near-in-time neighbors

use std::cmp::Ordering;

use thiserror::Error;

use crate::events::anchor::AnchorRule;
use crate::events::types::{EventPoint, EventSet};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Time and velocity columns differ in length: {time} vs {velocity}")]
    LengthMismatch { time: usize, velocity: usize },

    #[error("Cannot detect events in an empty series")]
    EmptyInput,

    #[error("Non-finite value at sample {index}")]
    NonFinite { index: usize },

    #[error("Zero time delta between candidates at t={time}")]
    DegenerateSlope { time: f64 },
}

/// Configuration for event detection
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Neighbor collection radius around the anchor, in seconds
    pub radius: f64,

    /// Hard cap on the event set size, anchor included
    pub max_points: usize,

    /// Rule selecting the anchor among candidates
    pub anchor_rule: AnchorRule,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            radius: 1.0,
            max_points: 4,
            anchor_rule: AnchorRule::VelocityOverMeanSlope,
        }
    }
}

/// Detect a seismic event in a smoothed series
///
/// Algorithm:
/// 1. Candidates are the samples with velocity strictly above the series
///    mean, kept in time order
/// 2. Fewer than two candidates leave no slope to measure; the result is
///    an empty set
/// 3. The mean absolute slope across consecutive candidates sets the
///    anchor threshold
/// 4. The first candidate satisfying the anchor rule becomes the anchor;
///    no qualifying candidate also yields an empty set
/// 5. Candidates within the radius of the anchor join as neighbors,
///    nearest first, until the set reaches `max_points`
pub fn detect(
    time: &[f64],
    velocity: &[f64],
    config: &DetectorConfig,
) -> Result<EventSet, DetectError> {
    validate(time, velocity)?;

    // A zero cap leaves no room even for the anchor
    if config.max_points == 0 {
        return Ok(EventSet::empty());
    }

    let mean_velocity = velocity.iter().sum::<f64>() / velocity.len() as f64;

    let candidates: Vec<EventPoint> = time
        .iter()
        .zip(velocity.iter())
        .filter(|&(_, &v)| v > mean_velocity)
        .map(|(&t, &v)| EventPoint::new(v, t))
        .collect();

    if candidates.len() <= 1 {
        return Ok(EventSet::empty());
    }

    let mean_slope = mean_absolute_slope(&candidates)?;

    let anchor_index = (0..candidates.len())
        .find(|&i| config.anchor_rule.qualifies(&candidates, i, mean_slope));
    let anchor_index = match anchor_index {
        Some(index) => index,
        None => return Ok(EventSet::empty()),
    };
    let anchor = candidates[anchor_index];

    // In-radius neighbors, excluding the anchor sample itself
    let mut neighbors: Vec<EventPoint> = candidates
        .iter()
        .enumerate()
        .filter(|&(i, point)| {
            i != anchor_index && (point.time - anchor.time).abs() <= config.radius
        })
        .map(|(_, point)| *point)
        .collect();

    // Stable sort keeps time order among equally distant neighbors
    neighbors.sort_by(|a, b| {
        let da = (a.time - anchor.time).abs();
        let db = (b.time - anchor.time).abs();
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    });

    let mut events = EventSet::with_anchor(anchor);
    for neighbor in neighbors {
        if !events.push_capped(neighbor, config.max_points) {
            break;
        }
    }

    Ok(events)
}

fn validate(time: &[f64], velocity: &[f64]) -> Result<(), DetectError> {
    if time.len() != velocity.len() {
        return Err(DetectError::LengthMismatch {
            time: time.len(),
            velocity: velocity.len(),
        });
    }
    if time.is_empty() {
        return Err(DetectError::EmptyInput);
    }
    for (index, (&t, &v)) in time.iter().zip(velocity.iter()).enumerate() {
        if !t.is_finite() || !v.is_finite() {
            return Err(DetectError::NonFinite { index });
        }
    }
    Ok(())
}

/// Mean absolute slope over consecutive candidate pairs
fn mean_absolute_slope(candidates: &[EventPoint]) -> Result<f64, DetectError> {
    let mut total = 0.0;
    for pair in candidates.windows(2) {
        let dt = pair[1].time - pair[0].time;
        if dt == 0.0 {
            return Err(DetectError::DegenerateSlope { time: pair[0].time });
        }
        total += ((pair[1].velocity - pair[0].velocity) / dt).abs();
    }
    Ok(total / (candidates.len() - 1) as f64)
}
