use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides the database location.
pub(crate) const DB_ENV: &str = "FLOWLEDGER_DB";
/// `tracing` filter directives, e.g. `flowledger=debug`.
pub(crate) const LOG_ENV: &str = "FLOWLEDGER_LOG";

const DEFAULT_LOG_FILTER: &str = "flowledger=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve from the platform data directory and the process environment,
    /// creating the data directory if needed.
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "flowledger", "FlowLedger")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let config = Self::resolve(proj_dirs.data_dir(), |key| std::env::var(key).ok());
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        Ok(config)
    }

    pub(crate) fn resolve(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let db_path = set(DB_ENV)
            .map(|p| PathBuf::from(crate::run::shellexpand(&p)))
            .unwrap_or_else(|| data_dir.join("flowledger.db"));
        Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            log_path: data_dir.join("flowledger.log"),
            log_filter: set(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_live_in_data_dir() {
        let config = Config::resolve(Path::new("/data"), |_| None);
        assert_eq!(config.db_path, PathBuf::from("/data/flowledger.db"));
        assert_eq!(config.log_path, PathBuf::from("/data/flowledger.log"));
        assert_eq!(config.log_filter, "flowledger=info");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::resolve(Path::new("/data"), |key| match key {
            DB_ENV => Some("/tmp/other.db".into()),
            LOG_ENV => Some("flowledger=debug".into()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.log_filter, "flowledger=debug");
        // The log file stays in the data dir
        assert_eq!(config.log_path, PathBuf::from("/data/flowledger.log"));
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = Config::resolve(Path::new("/data"), |_| Some("  ".into()));
        assert_eq!(config.db_path, PathBuf::from("/data/flowledger.db"));
        assert_eq!(config.log_filter, "flowledger=info");
    }
}
