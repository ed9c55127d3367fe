//! Local file source.

use super::{SchemaSource, SourceError};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSource {
    fn write_schema(&self, sink: &mut dyn Write) -> Result<u64, SourceError> {
        let mut file = File::open(&self.path).map_err(|source| SourceError::NotFound {
            path: self.path.clone(),
            source,
        })?;

        // A directory opens fine on unix and only fails on the first read.
        let is_dir = file.metadata().map(|m| m.is_dir()).unwrap_or(false);
        if is_dir {
            return Err(SourceError::NotFound {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
            });
        }

        let copied = io::copy(&mut file, sink).map_err(|source| SourceError::Io {
            what: "schema file",
            source,
        })?;

        debug!(path = %self.path.display(), bytes = copied, "read schema file");
        Ok(copied)
    }
}
