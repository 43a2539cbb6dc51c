use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Resolve the database location, creating its parent directory.
    ///
    /// `db_override` (from `--db`) wins over the platform data directory.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = if let Some(path) = db_override {
            path
        } else {
            let proj_dirs = ProjectDirs::from("", "", "sugarlog")
                .context("Could not determine home directory")?;
            proj_dirs.data_dir().join("sugarlog.db")
        };

        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }

        Ok(Config { db_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_creates_parent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("readings.db");
        let config = Config::load(Some(path.clone())).unwrap();
        assert_eq!(config.db_path, path);
        assert!(tmp.path().join("nested").is_dir());
    }

    #[test]
    fn test_bare_file_name_override() {
        let config = Config::load(Some(PathBuf::from("readings.db"))).unwrap();
        assert_eq!(config.db_path, PathBuf::from("readings.db"));
    }
}
