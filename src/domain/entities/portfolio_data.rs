use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::BUNDLED_DATA,
    entities::{
        analytics::AnalyticsSnapshot, blog_post::BlogPost, certificate::Certificate,
        project::Project,
    },
    errors::StorageError,
};

/// The whole site's content as one document. This is both the shape of
/// the bundled default dataset and of the admin export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioData {
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub blogs: Vec<BlogPost>,
    pub blog_categories: Vec<String>,
    pub analytics: AnalyticsSnapshot,
}

/// Record counts printed after an import.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub projects: usize,
    pub certificates: usize,
    pub blogs: usize,
    pub blog_categories: usize,
}

impl PortfolioData {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, StorageError> {
        Self::parse("bundled", BUNDLED_DATA)
    }

    /// Reads a dataset file, falling back to the bundled copy when the
    /// file does not exist.
    pub fn load_defaults(path: Option<&Path>) -> Result<Self, StorageError> {
        let Some(path) = path else {
            return Self::bundled();
        };

        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&path.display().to_string(), &raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Default dataset {} not found, using bundled data", path.display());
                Self::bundled()
            }
            Err(e) => Err(StorageError::Io {
                key: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    pub fn parse(source: &str, raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization {
            key: source.to_string(),
            message: e.to_string(),
        })
    }

    pub fn summary(&self) -> DataSummary {
        DataSummary {
            projects: self.projects.len(),
            certificates: self.certificates.len(),
            blogs: self.blogs.len(),
            blog_categories: self.blog_categories.len(),
        }
    }

    /// Name of the export download for `date`.
    pub fn export_file_name(date: chrono::NaiveDate) -> String {
        format!("portfolio-data-{}.json", date.format("%Y-%m-%d"))
    }
}
