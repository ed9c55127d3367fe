//! schemalint - canonical SQL schema formatter

use schemalint_cli::cli::{self, Args};
use schemalint_cli::lint::{lint_descriptor, resolve, LintError, LintOptions};
use schemalint_cli::logging::init_logging;
use schemalint_cli::output::OutputSink;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;

const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        // `-v` wins even over arguments clap rejects.
        Err(_) if wants_version() => {
            println!("{}", cli::version_string());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let message = err.to_string();
            let first_line = message.lines().next().unwrap_or("invalid arguments");
            eprintln!(
                "schemalint: error: {}",
                first_line.trim_start_matches("error: ")
            );
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if args.version {
        println!("{}", cli::version_string());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("schemalint: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn wants_version() -> bool {
    std::env::args_os()
        .skip(1)
        .take_while(|arg| arg != "--")
        .any(|arg| arg == "-v" || arg == "--version")
}

fn run(args: Args) -> Result<()> {
    let identifier = match args.sources.as_slice() {
        [identifier] => identifier,
        other => return Err(LintError::Argument(other.len()).into()),
    };

    // Validate the identifier before creating the output file.
    let source = resolve(identifier)?;

    let mut sink = OutputSink::open(args.output.as_deref()).with_context(|| match &args.output {
        Some(path) => format!("failed to open file {} for writing", path.display()),
        None => "failed to open standard output".to_string(),
    })?;

    let options = LintOptions {
        dialect: args.dialect.into(),
    };
    let report = lint_descriptor(&source, &options, &mut sink)?;
    sink.flush().context("failed to flush output")?;

    debug!(
        bytes = report.bytes_read,
        statements = report.statements,
        "done"
    );
    Ok(())
}
