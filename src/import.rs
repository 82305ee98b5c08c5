use std::{
    env, fs,
    path::{Path, PathBuf},
};

use derive_more::Display;

use crate::{
    constants::BUNDLED_DATA_PATH,
    entities::portfolio_data::{DataSummary, PortfolioData},
};

/// Overrides where `update-portfolio-data` writes the default dataset.
pub const TARGET_ENV: &str = "APP_DEFAULT_DATA_PATH";

#[derive(Debug, Display)]
pub enum ImportError {
    #[display("Please provide the path to the exported JSON file")]
    MissingArgument,

    #[display("File not found: {}", _0.display())]
    FileNotFound(PathBuf),

    #[display("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[display("{} is not a valid portfolio export: {message}", path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[display("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl std::error::Error for ImportError {}

/// Where the default dataset lives: `APP_DEFAULT_DATA_PATH` when set,
/// otherwise the crate's `data/portfolio_data.json`.
pub fn default_target() -> PathBuf {
    env::var(TARGET_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA_PATH))
}

/// Replaces the dataset at `target` with the exported document at `source`.
pub fn import_portfolio_data(source: &Path, target: &Path) -> Result<DataSummary, ImportError> {
    if !source.is_file() {
        return Err(ImportError::FileNotFound(source.to_path_buf()));
    }

    let raw = fs::read_to_string(source).map_err(|e| ImportError::Read {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    let data: PortfolioData = serde_json::from_str(&raw).map_err(|e| ImportError::InvalidJson {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    let write_error = |e: &dyn std::fmt::Display| ImportError::Write {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    let mut pretty = serde_json::to_string_pretty(&data).map_err(|e| write_error(&e))?;
    pretty.push('\n');

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
    }
    fs::write(target, pretty).map_err(|e| write_error(&e))?;

    tracing::info!("Default dataset rewritten at {}", target.display());
    Ok(data.summary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_reproduces_the_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("portfolio-data-2026-10-18.json");
        let target = dir.path().join("data").join("portfolio_data.json");

        let exported = PortfolioData::bundled().unwrap();
        fs::write(&export_path, serde_json::to_string(&exported).unwrap()).unwrap();

        let summary = import_portfolio_data(&export_path, &target).unwrap();

        assert_eq!(summary, exported.summary());
        let reloaded = PortfolioData::load_defaults(Some(target.as_path())).unwrap();
        assert_eq!(reloaded, exported);
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_portfolio_data(&dir.path().join("nope.json"), &dir.path().join("out.json"))
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
        assert!(!dir.path().join("out.json").exists());
    }

    #[test]
    fn malformed_json_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.json");
        let target = dir.path().join("out.json");
        fs::write(&source, "{ projects: ").unwrap();
        fs::write(&target, "original").unwrap();

        let err = import_portfolio_data(&source, &target).unwrap_err();

        assert!(matches!(err, ImportError::InvalidJson { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }
}
