//! Error types and handling for Resetter
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Failures of the reset transaction itself are reported to callers as a
//! [`crate::transaction::ResetResult`]; the variants here describe why, and
//! cover the process-level failures (unknown profile, broken profiles file,
//! prompt errors) that end the command.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Resetter operations
#[derive(Error, Diagnostic, Debug)]
pub enum ResetterError {
    // Profile errors
    #[error("Unknown application: {id}")]
    #[diagnostic(
        code(resetter::profile::not_found),
        help("Run 'resetter list' to see the supported applications")
    )]
    ProfileNotFound { id: String },

    #[error("No application given")]
    #[diagnostic(
        code(resetter::profile::required),
        help("Pass the application to reset, e.g. 'resetter reset cursor'")
    )]
    ProfileRequired,

    #[error("Confirmation required")]
    #[diagnostic(
        code(resetter::prompt::confirmation_required),
        help("Run in a terminal to confirm, or pass --yes")
    )]
    ConfirmationRequired,

    // Target document errors
    #[error("{name} not found.")]
    #[diagnostic(
        code(resetter::target::not_found),
        help("Start the application once so it creates its storage file")
    )]
    TargetNotFound {
        name: String,
        path: String,
        reason: String,
    },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(resetter::target::write_failed))]
    DocumentWriteFailed { path: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(resetter::target::reset_failed))]
    ResetFailed { message: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(resetter::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(resetter::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(resetter::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Could not determine the application config directory")]
    #[diagnostic(
        code(resetter::config::dir_unavailable),
        help("Set RESETTER_CONFIG_HOME to the directory holding the application data")
    )]
    ConfigDirUnavailable,

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(resetter::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(resetter::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<inquire::InquireError> for ResetterError {
    fn from(err: inquire::InquireError) -> Self {
        ResetterError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ResetterError>;
