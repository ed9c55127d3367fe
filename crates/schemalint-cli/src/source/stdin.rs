//! Standard input source.

use super::{SchemaSource, SourceError};
use std::io::{self, Read, Write};
use tracing::debug;

/// Reads the whole of standard input, with no size limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaSource for StdinSource {
    fn write_schema(&self, sink: &mut dyn Write) -> Result<u64, SourceError> {
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        copy_to_end(&mut handle, sink)
    }
}

fn copy_to_end(reader: &mut dyn Read, sink: &mut dyn Write) -> Result<u64, SourceError> {
    let copied = io::copy(reader, sink).map_err(|source| SourceError::Io {
        what: "standard input",
        source,
    })?;
    debug!(bytes = copied, "read schema from stdin");
    Ok(copied)
}
