//! Intermediate artifact persistence.
//!
//! Each pipeline stage's output is written as a standalone pretty-printed
//! JSON file right after the stage completes, for manual inspection. No
//! stage reads an artifact back in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates the output directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `value` as `<name>.json` under the artifact directory.
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, AppError> {
        let path = self.dir.join(format!("{name}.json"));
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!("Wrote artifact {}", path.display());
        Ok(path)
    }
}
