// ABOUTME: Error types for the attriloc pipeline including ErrorCode enum and ExtractError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidHtml,
    Inference,
    Timeout,
    MalformedRecord,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidHtml => "invalid HTML",
            ErrorCode::Inference => "inference error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::MalformedRecord => "malformed attribute record",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attriloc: {}: {}", self.op, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create an InvalidHtml error.
    pub fn invalid_html(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::InvalidHtml,
            op: op.into(),
            source,
        }
    }

    /// Create an Inference error.
    pub fn inference(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Inference,
            op: op.into(),
            source,
        }
    }

    /// Create a Timeout error.
    pub fn timeout(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Timeout,
            op: op.into(),
            source,
        }
    }

    /// Create a MalformedRecord error.
    pub fn malformed_record(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::MalformedRecord,
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is an InvalidHtml error.
    pub fn is_invalid_html(&self) -> bool {
        self.code == ErrorCode::InvalidHtml
    }

    /// Returns true if this is an Inference error.
    pub fn is_inference(&self) -> bool {
        self.code == ErrorCode::Inference
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a MalformedRecord error.
    pub fn is_malformed_record(&self) -> bool {
        self.code == ErrorCode::MalformedRecord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_and_code() {
        let err = ExtractError::invalid_html("Resolve", None);
        assert_eq!(err.to_string(), "attriloc: Resolve: invalid HTML");
    }

    #[test]
    fn display_includes_source() {
        let err = ExtractError::inference("Infer", Some(anyhow::anyhow!("boom")));
        assert!(err.to_string().ends_with("inference error: boom"));
    }

    #[test]
    fn code_helpers() {
        assert!(ExtractError::timeout("Infer", None).is_timeout());
        assert!(ExtractError::malformed_record("Merge", None).is_malformed_record());
        assert!(!ExtractError::inference("Infer", None).is_invalid_html());
    }
}
