use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename of the border list.
pub const BORDERS_FILENAME: &str = "borders.txt";
/// Default filename of the capital distance table.
pub const DISTANCES_FILENAME: &str = "capdist.csv";
/// Default filename of the country registry.
pub const REGISTRY_FILENAME: &str = "state_name.tsv";

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "ROADTRIP_DATA_DIR";

/// Locations of the three source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub borders: PathBuf,
    pub distances: PathBuf,
    pub registry: PathBuf,
}

impl DatasetPaths {
    /// Use the default filenames inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            borders: dir.join(BORDERS_FILENAME),
            distances: dir.join(DISTANCES_FILENAME),
            registry: dir.join(REGISTRY_FILENAME),
        }
    }

    pub fn with_borders(mut self, path: impl Into<PathBuf>) -> Self {
        self.borders = path.into();
        self
    }

    pub fn with_distances(mut self, path: impl Into<PathBuf>) -> Self {
        self.distances = path.into();
        self
    }

    pub fn with_registry(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry = path.into();
        self
    }

    /// Fail with [`Error::DatasetNotFound`] for the first missing file.
    pub fn ensure_exists(&self) -> Result<()> {
        for path in [&self.registry, &self.borders, &self.distances] {
            if !path.is_file() {
                return Err(Error::DatasetNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Resolve the platform-specific data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "roadtrip", "roadtrip").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the dataset directory.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `ROADTRIP_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_data_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(env_path));
    }

    default_data_dir()
}

/// Resolve the dataset directory and return the default file locations in it.
pub fn resolve_dataset(target: Option<&Path>) -> Result<DatasetPaths> {
    let dir = resolve_data_dir(target)?;
    debug!(path = %dir.display(), "resolved dataset directory");
    Ok(DatasetPaths::in_dir(&dir))
}
