// Quakescan - seismic event detection for planetary seismometer data
// Module declarations

pub mod catalog;
pub mod events;
pub mod pipeline;
pub mod profiles;
pub mod series;

pub use catalog::{
    calculate_sha256, read_catalog, read_report, store_report, write_events, CatalogError,
    CatalogRecord, CatalogWriter, DetectionReport, ReportParams, Workspace,
};
pub use events::{detect, AnchorRule, DetectError, DetectorConfig, EventPoint, EventSet};
pub use pipeline::{run_detection, PipelineConfig, PipelineError, PipelineOutcome};
pub use profiles::{DatasetProfile, DatasetVariant, EventsCsvMode};
pub use series::{parse_series, smooth, IngestError, SeriesData, SmoothError, SmootherConfig};
