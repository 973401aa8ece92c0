//! Error handling for modgen.
//! Defines the error type and result alias used throughout the generator.

use std::io;
use std::path::Path;
use thiserror::Error;

/// All failures a generation run can end with.
///
/// Every variant is terminal for the run: nothing in modgen retries.
#[derive(Error, Debug)]
pub enum Error {
    /// A check performed before any mutation did not hold
    /// (module root already exists, configured module directory missing).
    #[error("Precondition failed: {0}.")]
    PreconditionFailed(String),

    /// A template or static resource name did not resolve.
    #[error("Template '{name}' not found.")]
    TemplateNotFound { name: String },

    /// A filesystem operation failed on `path`.
    #[error("IO error on '{path}': {source}.")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An external command whose exit status is checked returned non-zero.
    #[error("Command '{command}' failed with status {status}: {output}")]
    ProcessFailed { command: String, status: String, output: String },

    /// Host configuration could not be read or understood.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A preset answer was rejected.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The terminal prompt failed.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Preset answers supplied on stdin were not valid JSON.
    #[error("Failed to parse answers: {0}.")]
    AnswersError(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an [`io::Error`] together with the path it happened on.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::IoError { path: path.as_ref().display().to_string(), source }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::PromptError(err.to_string())
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
