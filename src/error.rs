//! CLI error types with contextual suggestions
//!
//! Engine-level failures (malformed maps, missing content) are
//! per-bundle and never fatal; the errors here are the ones the binary
//! itself can hit before or around an analysis (unreadable inputs,
//! broken configuration) and carry actionable suggestions plus proper
//! exit codes for CI.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the bundle-dedupe CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Bundle script file missing on disk
    #[error("script not found: {path}")]
    ScriptNotFound {
        /// Path the user passed
        path: PathBuf,
    },

    /// Source map file exists but is not valid JSON
    #[error("invalid source map: {path}")]
    MapParse {
        /// Path to the map file
        path: PathBuf,
        #[source]
        /// JSON parse failure
        source: serde_json::Error,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// What was being read or written
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl CliError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ScriptNotFound { path } => Some(format!(
                "Check the path: {} does not exist. Pass the compiled .js bundles as arguments",
                path.display()
            )),
            Self::MapParse { path, .. } => Some(format!(
                "{} is not a valid source map. Re-generate it with your bundler's devtool/sourcemap option",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions where one fits.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptNotFound { .. } => 66, // EX_NOINPUT
            Self::MapParse { .. } => 65,       // EX_DATAERR
            Self::Io { .. } => 74,             // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and any suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();
        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(cli_error) = error.downcast_ref::<CliError>() {
            if let Some(suggestion) = cli_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(cli_error) = error.downcast_ref::<CliError>() {
            cli_error.exit_code()
        } else {
            1
        }
    }
}
