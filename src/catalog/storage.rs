// File system layout for catalog files and run artifacts
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed catalog line: {line:?}")]
    MalformedRecord { line: String },

    #[error("Catalog writer lock poisoned")]
    Poisoned,
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Output tree rooted at one directory
///
/// Catalog files and the events CSV live under `catalogs/`; JSON run
/// reports live under `reports/`.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open a workspace, creating its directory tree as needed
    pub fn create(root: impl Into<PathBuf>) -> CatalogResult<Self> {
        let root = root.into();
        fs::create_dir_all(root.join("catalogs"))?;
        fs::create_dir_all(root.join("reports"))?;
        Ok(Workspace { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the per-variant catalogs and the events CSV
    pub fn catalogs_dir(&self) -> PathBuf {
        self.root.join("catalogs")
    }

    /// Directory holding JSON run reports
    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// Path of a per-variant catalog file
    pub fn catalog_path(&self, catalog_file: &str) -> PathBuf {
        self.catalogs_dir().join(catalog_file)
    }

    /// Path of the combined events CSV
    pub fn events_csv_path(&self) -> PathBuf {
        self.catalogs_dir().join("outputCatalog.csv")
    }
}

/// Calculate SHA256 hash of data
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
