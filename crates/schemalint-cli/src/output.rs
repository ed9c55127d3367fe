//! Destination for rendered schema text.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

/// Permission bits for a created output file: read-write for owner and group.
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o664;

/// Standard output, or a file created (or truncated) for writing.
pub enum OutputSink {
    Stdout(Stdout),
    File(BufWriter<File>),
}

impl OutputSink {
    pub fn stdout() -> Self {
        Self::Stdout(io::stdout())
    }

    /// Create or truncate `path`. Nothing is rolled back if a later stage fails.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(OUTPUT_FILE_MODE);
        }
        Ok(Self::File(BufWriter::new(options.open(path)?)))
    }

    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => Self::create(path),
            None => Ok(Self::stdout()),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File(out) => out.flush(),
        }
    }
}
