// Series processing module
// Handles CSV ingestion and velocity smoothing

pub mod ingest;
pub mod smooth;

pub use ingest::{parse_series, IngestError, SeriesData};
pub use smooth::{effective_window, smooth, SmoothError, SmootherConfig};
