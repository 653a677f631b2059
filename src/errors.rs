//! Error types with diagnostics using miette
//!
//! Only matrix generation can fail while rendering. Path compilation and layout
//! are total; `ConfigError` exists for callers who want to vet user input first.

use miette::Diagnostic;
use thiserror::Error;

use crate::matrix::EcLevel;
use crate::types::NumericError;

// ============================================================================
// Generation Errors
// ============================================================================

/// Errors raised while producing the module matrix
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid error correction level: {level:?}")]
    #[diagnostic(
        code(qrpath::generate::invalid_ecl),
        help("use one of L, M, Q or H")
    )]
    InvalidErrorCorrectionLevel { level: String },

    #[error("data too long to encode at error correction level {ecl}")]
    #[diagnostic(
        code(qrpath::generate::data_too_long),
        help("shorten the value or pick a lower error correction level")
    )]
    DataTooLong { ecl: EcLevel },

    #[error("no QR version can hold this data")]
    #[diagnostic(code(qrpath::generate::invalid_version))]
    InvalidVersion,

    #[error("unsupported character set")]
    #[diagnostic(code(qrpath::generate::unsupported_charset))]
    UnsupportedCharacterSet,

    #[error("invalid ECI designator")]
    #[diagnostic(code(qrpath::generate::invalid_eci))]
    InvalidEciDesignator,

    #[error("value contains a character the selected mode cannot encode")]
    #[diagnostic(code(qrpath::generate::invalid_character))]
    InvalidCharacter,

    #[error("generator returned a malformed matrix ({rows} rows, row width {width})")]
    #[diagnostic(
        code(qrpath::generate::malformed_matrix),
        help("a module matrix must be square with at least one row")
    )]
    MalformedMatrix { rows: usize, width: usize },
}

impl GenerationError {
    /// Translate an encoder failure, remembering which level was requested.
    pub fn from_qr(err: qrcode::types::QrError, ecl: EcLevel) -> Self {
        use qrcode::types::QrError;

        match err {
            QrError::DataTooLong => GenerationError::DataTooLong { ecl },
            QrError::InvalidVersion => GenerationError::InvalidVersion,
            QrError::UnsupportedCharacterSet => GenerationError::UnsupportedCharacterSet,
            QrError::InvalidEciDesignator => GenerationError::InvalidEciDesignator,
            QrError::InvalidCharacter => GenerationError::InvalidCharacter,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// A numeric option failed validation
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("invalid `{field}`: {source}")]
#[diagnostic(code(qrpath::config::invalid_number))]
pub struct ConfigError {
    pub field: &'static str,
    #[source]
    pub source: NumericError,
}

impl ConfigError {
    pub fn new(field: &'static str, source: NumericError) -> Self {
        Self { field, source }
    }
}
