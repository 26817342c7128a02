// ABOUTME: Error types for the prompt formatter including ErrorCode enum and FormatError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the categories of formatting failures.
///
/// The tree transform itself is total; every failure comes from the parser
/// collaborator, the caller's options, or reading the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Parse,
    InvalidOptions,
    Input,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Parse => "parse error",
            ErrorCode::InvalidOptions => "invalid options",
            ErrorCode::Input => "input error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for format operations.
#[derive(Debug, thiserror::Error)]
pub struct FormatError {
    pub code: ErrorCode,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prompt: {}: {}", self.op, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl FormatError {
    /// Create a Parse error. Parser collaborators use this to report failures.
    pub fn parse(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Parse,
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidOptions error.
    pub fn invalid_options(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::InvalidOptions,
            op: op.into(),
            source,
        }
    }

    /// Create an Input error.
    pub fn input(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Input,
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is an InvalidOptions error.
    pub fn is_invalid_options(&self) -> bool {
        self.code == ErrorCode::InvalidOptions
    }

    /// Returns true if this is an Input error.
    pub fn is_input(&self) -> bool {
        self.code == ErrorCode::Input
    }
}
