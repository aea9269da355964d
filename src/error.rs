//! Error types and error handling strategy for the alternator.
//!
//! Error handling follows these principles:
//!
//! - Every checked operation returns a typed error; nothing is retried and
//!   nothing is swallowed
//! - Each error carries the name of the operation that failed, which is the
//!   first field of the diagnostic line
//! - Leaf errors ([`SemaphoreError`], [`ConfigError`], `io::Error`) are kept
//!   as the source so the description comes from the failing layer
//!
//! # Error Categories
//!
//! - **Configuration**: invalid arguments to an internal operation
//! - **Argument**: malformed shared-context construction, reported as a
//!   configuration error
//! - **Resource**: semaphore init/destroy/wait/post, thread create/join
//! - **Output**: writing a line failed

use core::fmt;
use std::sync::Arc;

use crate::cli::ExitCode;
use crate::cli::diagnostic::format_diagnostic;
use crate::config::ConfigError;
use crate::sync::SemaphoreError;

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration or invalid argument to an internal operation.
    Configuration,
    /// Malformed shared-context construction.
    Argument,
    /// A semaphore or thread operation failed.
    Resource,
    /// Writing a line to the sink failed.
    Output,
}

impl ErrorKind {
    /// Returns true for kinds treated as configuration errors.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration | Self::Argument)
    }

    /// Short description used when the error has no message or source.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "invalid configuration",
            Self::Argument => "invalid argument",
            Self::Resource => "resource failure",
            Self::Output => "output failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The main error type for alternator operations.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    operation: &'static str,
    message: Option<String>,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    closed: bool,
}

impl Error {
    /// Creates a new error of `kind` raised by `operation`.
    #[must_use]
    pub const fn new(kind: ErrorKind, operation: &'static str) -> Self {
        Self {
            kind,
            operation,
            message: None,
            source: None,
            closed: false,
        }
    }

    /// Creates a resource error from a failed semaphore operation.
    #[must_use]
    pub fn semaphore(operation: &'static str, err: SemaphoreError) -> Self {
        let mut error = Self::new(ErrorKind::Resource, operation).with_source(err);
        error.closed = err.is_closed();
        error
    }

    /// Creates an output error from a failed write.
    #[must_use]
    pub fn output(operation: &'static str, err: std::io::Error) -> Self {
        Self::new(ErrorKind::Output, operation).with_source(err)
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(operation: &'static str, err: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, operation).with_source(err)
    }

    /// Creates an argument error with a message.
    #[must_use]
    pub fn argument(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument, operation).with_message(detail)
    }

    /// Adds a message description to the error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Adds a source error to the chain.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the name of the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if this error only reports a semaphore closed by an abort.
    ///
    /// Such an error is the consequence of a failure elsewhere, never the
    /// root cause.
    #[must_use]
    pub const fn is_abort_consequence(&self) -> bool {
        self.closed
    }

    /// Human-readable description: the message, else the source, else the kind.
    #[must_use]
    pub fn description(&self) -> String {
        match (&self.message, &self.source) {
            (Some(msg), Some(source)) => format!("{msg}: {source}"),
            (Some(msg), None) => msg.clone(),
            (None, Some(source)) => source.to_string(),
            (None, None) => self.kind.description().to_string(),
        }
    }

    /// The single diagnostic line reported on fatal failure.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        format_diagnostic(self.operation, &self.description())
    }

    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        ExitCode::FAILURE
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.operation, self.description())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
