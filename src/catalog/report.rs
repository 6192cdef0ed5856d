// Run report artifacts
// JSON summary of one detection run, stored under reports/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::catalog::storage::{CatalogResult, Workspace};
use crate::events::{AnchorRule, EventSet};
use crate::profiles::DatasetVariant;

/// Effective parameters of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    pub window: usize,
    pub order: usize,
    pub radius: f64,
    pub max_points: usize,
    pub anchor_rule: AnchorRule,
}

/// JSON summary of one detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Unique identifier for this run
    pub id: Uuid,

    /// When the run finished
    pub created_at: DateTime<Utc>,

    /// Dataset variant the run was parsed with
    pub variant: DatasetVariant,

    /// Name of the ingested source file
    pub source_file: String,

    /// SHA256 hex digest of the raw input bytes
    pub input_sha256: String,

    /// Effective smoothing and detection parameters
    pub params: ReportParams,

    /// Detected events, anchor first
    pub events: EventSet,
}

impl DetectionReport {
    /// Create a new report with generated id and current timestamp
    pub fn new(
        variant: DatasetVariant,
        source_file: impl Into<String>,
        input_sha256: String,
        params: ReportParams,
        events: EventSet,
    ) -> Self {
        DetectionReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            variant,
            source_file: source_file.into(),
            input_sha256,
            params,
            events,
        }
    }

    /// File name of this report under the reports directory
    pub fn file_name(&self) -> String {
        format!("report_{}.json", self.id)
    }
}

/// Write a report into the workspace and return its path
pub fn store_report(workspace: &Workspace, report: &DetectionReport) -> CatalogResult<PathBuf> {
    let path = workspace.reports_dir().join(report.file_name());
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Read a report back from disk
pub fn read_report(path: &Path) -> CatalogResult<DetectionReport> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventPoint;
    use tempfile::TempDir;

    fn sample_report() -> DetectionReport {
        let mut events = EventSet::with_anchor(EventPoint::new(8.0, 5.0));
        events.push_capped(EventPoint::new(9.0, 6.0), 4);

        DetectionReport::new(
            DatasetVariant::Mars,
            "sol_1000.csv",
            "6ae33f879c3ddaabfb2833208a9528c00c38dfd1e32fc75f38d2fe252cb87665".to_string(),
            ReportParams {
                window: 11,
                order: 2,
                radius: 1.0,
                max_points: 4,
                anchor_rule: AnchorRule::VelocityOverMeanSlope,
            },
            events,
        )
    }

    #[test]
    fn test_report_file_name() {
        let report = sample_report();

        let name = report.file_name();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".json"));
        assert!(name.contains(&report.id.to_string()));
    }

    #[test]
    fn test_store_and_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::create(temp_dir.path()).unwrap();
        let report = sample_report();

        let path = store_report(&workspace, &report).unwrap();
        assert!(path.starts_with(workspace.reports_dir()));

        let read_back = read_report(&path).unwrap();
        assert_eq!(read_back.id, report.id);
        assert_eq!(read_back.variant, DatasetVariant::Mars);
        assert_eq!(read_back.source_file, "sol_1000.csv");
        assert_eq!(read_back.params, report.params);
        assert_eq!(read_back.events, report.events);
    }

    #[test]
    fn test_report_json_shape() {
        let report = sample_report();

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"input_sha256\""));
        assert!(json.contains("\"velocity\":8.0"));
        assert!(json.contains("\"anchor_rule\":\"VelocityOverMeanSlope\""));
    }
}
