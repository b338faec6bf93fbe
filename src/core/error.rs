//! Error handling for envtpl.
//!
//! [`Error`] classifies the failure of a whole invocation: bad usage, an
//! unreadable template, a template that does not parse, or a template whose
//! execution aborted. Template functions fail with [`AccessorError`] or
//! [`UtilityError`]; those travel through the template engine and end up
//! attached as the source of [`Error::TemplateExecution`].
//!
//! # Examples
//!
//! ```
//! use envtpl::core::error::{AccessorError, ValueKind};
//!
//! let err = AccessorError::NotFound {
//!     key: "PORT".to_string(),
//!     expected: ValueKind::Port,
//! };
//! assert_eq!(err.key(), Some("PORT"));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for envtpl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for envtpl operations
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong command line, reported before any template work begins
    #[error("usage error: {0}")]
    Usage(#[source] clap::Error),

    /// Template file missing or unreadable
    #[error("error reading template file '{}': {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template syntax rejected by the template engine
    #[error("error parsing template: {0}")]
    TemplateParse(#[from] handlebars::TemplateError),

    /// A template function failed while the template was executing
    #[error("error executing template: {0}")]
    TemplateExecution(#[from] handlebars::RenderError),
}

impl Error {
    /// The accessor failure that aborted execution, if any.
    pub fn accessor_cause(&self) -> Option<&AccessorError> {
        self.execution_cause()
    }

    /// The utility failure that aborted execution, if any.
    pub fn utility_cause(&self) -> Option<&UtilityError> {
        self.execution_cause()
    }

    fn execution_cause<T: StdError + 'static>(&self) -> Option<&T> {
        match self {
            Self::TemplateExecution(err) => err.source().and_then(|cause| cause.downcast_ref::<T>()),
            _ => None,
        }
    }
}

/// Type an accessor attempted to read a variable as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    StringSlice,
    Bool,
    Int,
    IntSlice,
    Float,
    FloatSlice,
    Url,
    HostPort,
    Port,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::StringSlice => "string slice",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::IntSlice => "integer slice",
            Self::Float => "float",
            Self::FloatSlice => "float slice",
            Self::Url => "URL",
            Self::HostPort => "host:port",
            Self::Port => "port",
        };
        f.write_str(name)
    }
}

/// Failure of a required environment accessor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("environment variable '{key}' not found (expected {expected})")]
    NotFound { key: String, expected: ValueKind },

    #[error("could not parse '{key}' (value: '{value}') as {expected}: {reason}")]
    Malformed {
        key: String,
        value: String,
        expected: ValueKind,
        reason: String,
    },

    #[error("port '{key}' (value: '{value}') is out of range (1-65535)")]
    PortOutOfRange {
        key: String,
        value: String,
        expected: ValueKind,
    },

    /// Raised by `asPortOr` before the variable is even looked up
    #[error("default port '{port}' is out of range (1-65535)")]
    DefaultPortOutOfRange { port: i64 },
}

impl AccessorError {
    /// Name of the variable involved, when the failure concerns one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotFound { key, .. }
            | Self::Malformed { key, .. }
            | Self::PortOutOfRange { key, .. } => Some(key),
            Self::DefaultPortOutOfRange { .. } => None,
        }
    }

    pub fn expected(&self) -> ValueKind {
        match self {
            Self::NotFound { expected, .. }
            | Self::Malformed { expected, .. }
            | Self::PortOutOfRange { expected, .. } => *expected,
            Self::DefaultPortOutOfRange { .. } => ValueKind::Port,
        }
    }
}

/// Failure of a stateless template utility
#[derive(Debug, Error)]
pub enum UtilityError {
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHash(String),

    #[error("could not decode base64 string: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("could not read default file '{}': {source}", path.display())]
    SeedSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not copy file '{}' to '{}': {source}", from.display(), to.display())]
    SeedCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
