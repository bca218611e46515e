use serde::Serialize;

/// All application errors, categorized by domain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Market ──
    #[error("Instrument not found: {0}")]
    InstrumentNotFound(String),

    // ── Indicator ──
    #[error("Invalid indicator parameters: {0}")]
    InvalidIndicatorParams(String),

    #[error("Insufficient data for indicator calculation: need {needed} bars, got {available}")]
    InsufficientData { needed: usize, available: usize },

    // ── Configuration ──
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // ── Files ──
    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Failed to write file: {0}")]
    FileWrite(String),

    // ── Serialization ──
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Serializable error response for the presentation layer.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = match err {
            AppError::InstrumentNotFound(_) => "INSTRUMENT_NOT_FOUND",
            AppError::InvalidIndicatorParams(_) => "INVALID_INDICATOR_PARAMS",
            AppError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            AppError::InvalidConfig(_) => "INVALID_CONFIG",
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::FileRead(_) => "FILE_READ",
            AppError::FileWrite(_) => "FILE_WRITE",
            AppError::Serialization(_) => "SERIALIZATION",
        };
        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let response = ErrorResponse::from(self);
        response.serialize(serializer)
    }
}

// ── Conversions from external errors ──

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileWrite(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileRead(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidDate(err.to_string())
    }
}
