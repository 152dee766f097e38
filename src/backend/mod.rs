//! Read access to the hosted order store.
//!
//! The collection report and the invoice command only ever read; both talk to
//! the store through the traits below so a local JSON file can stand in for
//! the HTTP endpoint.

mod query;
mod rest;

pub use query::{KotQuery, KOT_SELECT};
pub use rest::RestClient;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PosError, Result};
use crate::format::parse_timestamp;
use crate::model::{InvoiceDocument, KotRecord};

pub trait KotSource {
    fn fetch_kots(&self, query: &KotQuery) -> Result<Vec<KotRecord>>;
}

pub trait InvoiceSource {
    fn fetch_invoice(&self, number: &str) -> Result<InvoiceDocument>;
}

/// Tickets from a JSON array on disk, filtered the same way the backend
/// filters them.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KotSource for FileSource {
    fn fetch_kots(&self, query: &KotQuery) -> Result<Vec<KotRecord>> {
        let records: Vec<KotRecord> = read_json(&self.path)?;
        let total = records.len();

        let matching: Vec<KotRecord> = records
            .into_iter()
            .filter(|record| {
                let created = record.created_at.as_deref().and_then(parse_timestamp);
                match (created, record.status.as_ref()) {
                    (Some(created), Some(status)) => query.matches(&created, status),
                    _ => false,
                }
            })
            .collect();

        debug!(
            path = %self.path.display(),
            total,
            matching = matching.len(),
            "filtered tickets from file"
        );
        Ok(matching)
    }
}

/// Load an invoice document (`{"invoice": {...}, "items": [...]}`) from disk.
pub fn load_invoice_file(path: &Path) -> Result<InvoiceDocument> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PosError::Parse {
        what: path.display().to_string(),
        source: e,
    })
}
