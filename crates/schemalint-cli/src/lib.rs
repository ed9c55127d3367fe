//! schemalint CLI library.
//!
//! Resolves a schema source identifier, reads the raw schema and re-emits it as
//! canonical statements. The `schemalint` binary is a thin wrapper around
//! [`lint::resolve`] and [`lint::lint_descriptor`].

pub mod cli;
pub mod lint;
pub mod logging;
pub mod output;
pub mod source;

pub use cli::Args;
pub use lint::{lint_descriptor, resolve, LintError, LintOptions, LintReport};
pub use source::{SchemaSource, SourceDescriptor, SourceError, SourceKind};
