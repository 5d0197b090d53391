//! Structured error types shared across the epidemic crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`EpiError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, prefixes, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the epidemic engine and artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EpiError {
    /// Out-of-range model parameter, rejected at construction.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// A one-shot run was invoked a second time.
    #[error("already run: {0}")]
    AlreadyRun(ErrorInfo),
    /// A path component exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(ErrorInfo),
    /// A directory could not be created, written or traversed.
    #[error("permission denied: {0}")]
    PermissionDenied(ErrorInfo),
    /// No artifact matches the requested identifier prefix.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// More than one artifact matches the requested identifier prefix.
    #[error("ambiguous: {0}")]
    Ambiguous(ErrorInfo),
    /// Filesystem read or write failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed graph text or invalid template parameters.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl EpiError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            EpiError::InvalidParameter(info)
            | EpiError::AlreadyRun(info)
            | EpiError::NotADirectory(info)
            | EpiError::PermissionDenied(info)
            | EpiError::NotFound(info)
            | EpiError::Ambiguous(info)
            | EpiError::Io(info)
            | EpiError::Graph(info)
            | EpiError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Shorthand for an [`EpiError::InvalidParameter`] naming the parameter and its value.
    pub fn invalid_parameter(name: &str, value: impl ToString, expected: &str) -> Self {
        EpiError::InvalidParameter(
            ErrorInfo::new("invalid-parameter", format!("{name} must be {expected}"))
                .with_context("parameter", name)
                .with_context("value", value.to_string()),
        )
    }
}
