//! Bulk-upload job record.
//!
//! One transient record per accepted file. Never persisted; only the
//! newest job is surfaced to callers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Per-row failure description attached to a finished job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRowError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResults {
    pub total: usize,
    pub processed: usize,
    pub errors: Vec<UploadRowError>,
}

/// An in-flight or finished upload job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetUpload {
    pub file_name: String,
    pub status: UploadStatus,
    /// 0-100; monotonic non-decreasing.
    pub progress: u8,
    pub results: Option<UploadResults>,
}

impl AssetUpload {
    pub fn new(file_name: impl Into<String>) -> Self {
        AssetUpload {
            file_name: file_name.into(),
            status: UploadStatus::Pending,
            progress: 0,
            results: None,
        }
    }

    /// Advance progress. Regressions are ignored so progress stays
    /// monotonic; values above 100 are clamped.
    pub fn advance(&mut self, progress: u8) {
        let progress = progress.min(100);
        if progress > self.progress {
            self.progress = progress;
            if self.status == UploadStatus::Pending {
                self.status = UploadStatus::Processing;
            }
        }
    }

    pub fn complete(&mut self, results: UploadResults) {
        self.progress = 100;
        self.status = UploadStatus::Completed;
        self.results = Some(results);
    }

    pub fn fail(&mut self, results: UploadResults) {
        self.status = UploadStatus::Failed;
        self.results = Some(results);
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, UploadStatus::Completed | UploadStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotonic() {
        let mut job = AssetUpload::new("assets.csv");
        job.advance(40);
        assert_eq!(job.status, UploadStatus::Processing);
        job.advance(20);
        assert_eq!(job.progress, 40);
        job.advance(200);
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn complete_records_results() {
        let mut job = AssetUpload::new("assets.csv");
        job.complete(UploadResults {
            total: 5,
            processed: 5,
            errors: vec![],
        });
        assert!(job.is_terminal());
        assert_eq!(job.progress, 100);
        assert_eq!(job.results.as_ref().unwrap().processed, 5);
    }
}
