//! Error types for the psvg conversion library.

use thiserror::Error;

/// Primary error type for operator processing.
///
/// None of these errors is fatal to a conversion session: the handler state
/// stays valid and subsequent operators can be processed normally.
#[derive(Error, Debug)]
pub enum PsError {
    #[error("incomplete shading data")]
    IncompleteShadingData,

    #[error("invalid shading data: {0}")]
    InvalidShading(String),

    #[error("unsupported shading type: {0}")]
    UnsupportedShading(i32),

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("operator {op} expects {expected} operands, got {got}")]
    MissingOperands {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("trace syntax error at line {line}: {msg}")]
    TraceSyntax { line: usize, msg: String },
}

/// Convenience Result type alias for PsError.
pub type Result<T> = std::result::Result<T, PsError>;
