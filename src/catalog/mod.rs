// Catalog module
// Handles plain-text catalog output and JSON run reports

pub mod events_csv;
pub mod report;
pub mod storage;
pub mod writer;

pub use events_csv::write_events;
pub use report::{read_report, store_report, DetectionReport, ReportParams};
pub use storage::{calculate_sha256, CatalogError, CatalogResult, Workspace};
pub use writer::{read_catalog, CatalogRecord, CatalogWriter};
