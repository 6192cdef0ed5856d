// Event detection module
// Candidate selection and anchor-based neighbor collection

pub mod anchor;
pub mod detector;
pub mod types;

pub use anchor::AnchorRule;
pub use detector::{detect, DetectError, DetectorConfig};
pub use types::{EventPoint, EventSet};
