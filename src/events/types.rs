// Event detection types
// Defines the detected-point and event-set structures shared by the
// detector and the catalog writers

use serde::{Deserialize, Serialize};

/// One detected sample of a seismic event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPoint {
    /// Smoothed velocity at the sample, in instrument units
    pub velocity: f64,

    /// Relative timestamp of the sample in seconds
    pub time: f64,
}

impl EventPoint {
    pub fn new(velocity: f64, time: f64) -> Self {
        EventPoint { velocity, time }
    }
}

/// An ordered set of detected event points
///
/// The first point is the anchor; the rest are neighbors in ascending time
/// distance from it. An empty set means "no event detected" and is a
/// normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSet {
    points: Vec<EventPoint>,
}

impl EventSet {
    /// The "no event detected" result
    pub fn empty() -> Self {
        EventSet { points: Vec::new() }
    }

    /// Start a set from its anchor point
    pub fn with_anchor(anchor: EventPoint) -> Self {
        EventSet {
            points: vec![anchor],
        }
    }

    /// Append a point unless the set already holds `max_points`
    /// Returns whether the point was appended
    pub fn push_capped(&mut self, point: EventPoint, max_points: usize) -> bool {
        if self.points.len() >= max_points {
            return false;
        }
        self.points.push(point);
        true
    }

    /// The anchor point, when the set is non-empty
    pub fn anchor(&self) -> Option<&EventPoint> {
        self.points.first()
    }

    pub fn points(&self) -> &[EventPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
