//! Dashboard aggregation for Cirrus.
//!
//! Computes per-user storage usage and category breakdowns from the file
//! registry. Usage is derived from `SUM(size)` at query time, so it stays
//! correct even though the blob store may hold orphaned objects.

use serde::Serialize;

use crate::db::Database;
use crate::file::{FileCategory, FileRepository};
use crate::Result;

/// Bytes per GiB.
const GIB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Number of entries in the recent-files list.
const RECENT_LIMIT: u32 = 5;

/// Storage usage against the fixed quota.
#[derive(Debug, Serialize)]
pub struct StorageUsage {
    /// Quota in GiB.
    pub total: u64,
    /// Used storage in GiB, rounded to 2 decimals.
    pub used: f64,
    /// Used percentage of the quota, rounded to the nearest integer.
    #[serde(rename = "usedPercentage")]
    pub used_percentage: u32,
}

/// Per-category summary.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    /// Number of files in the category.
    pub files: i64,
    /// Creation timestamp of the most recent upload, if any.
    pub date: Option<String>,
}

impl CategorySummary {
    fn empty() -> Self {
        Self {
            files: 0,
            date: None,
        }
    }
}

/// Recently uploaded file.
#[derive(Debug, Serialize)]
pub struct RecentFile {
    /// File ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub date: String,
}

/// Aggregated dashboard view for one user.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Storage usage.
    pub storage: StorageUsage,
    /// Document summary.
    pub documents: CategorySummary,
    /// Image summary.
    pub images: CategorySummary,
    /// Video/audio summary.
    pub videos: CategorySummary,
    /// Uncategorized summary.
    pub others: CategorySummary,
    /// Most recently uploaded files.
    pub recent: Vec<RecentFile>,
}

/// Computes the dashboard view from the file registry.
#[derive(Clone)]
pub struct DashboardService {
    db: Database,
    quota_gb: u64,
}

impl DashboardService {
    /// Create a new DashboardService with the configured quota.
    pub fn new(db: Database, quota_gb: u64) -> Self {
        Self { db, quota_gb }
    }

    /// Summarize storage usage for one user.
    ///
    /// The zero-files case yields zero counts and a zero percentage with no
    /// division errors.
    pub async fn summarize(&self, owner_id: i64) -> Result<DashboardView> {
        let repo = FileRepository::new(self.db.pool());

        let total_bytes = repo.total_size(owner_id).await?;
        let aggregates = repo.category_aggregates(owner_id).await?;
        let recent_records = repo.recent(owner_id, RECENT_LIMIT).await?;

        let used = round2(total_bytes as f64 / GIB);
        let used_percentage = (used / self.quota_gb as f64 * 100.0).round() as u32;

        let summary_for = |category: FileCategory| {
            aggregates
                .iter()
                .find(|a| a.category == category.as_str())
                .map(|a| CategorySummary {
                    files: a.file_count,
                    date: a.latest_upload.clone(),
                })
                .unwrap_or_else(CategorySummary::empty)
        };

        Ok(DashboardView {
            storage: StorageUsage {
                total: self.quota_gb,
                used,
                used_percentage,
            },
            documents: summary_for(FileCategory::Document),
            images: summary_for(FileCategory::Image),
            videos: summary_for(FileCategory::VideoOrAudio),
            others: summary_for(FileCategory::Other),
            recent: recent_records
                .into_iter()
                .map(|f| RecentFile {
                    id: f.id,
                    name: f.name,
                    date: f.created_at,
                })
                .collect(),
        })
    }
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
