//! Destinations for generated documents

use std::fs;
use std::path::{Path, PathBuf};
use swagger_actions_common::{GeneratorError, Result};

/// Receives finished documents
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSink {
    fn write(&mut self, name: &str, contents: &str) -> Result<()>;
}

/// Writes documents as files into one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the sink, creating `dir` and its parents if needed
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to create output directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl DocumentSink for DirectorySink {
    fn write(&mut self, name: &str, contents: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
        })?;

        self.written.push(path);
        Ok(())
    }
}
