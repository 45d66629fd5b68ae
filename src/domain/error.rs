//! Domain error types.

/// Top-level error type for linedeck.
#[derive(Debug, thiserror::Error)]
pub enum LinedeckError {
    #[error("dataset unavailable: {reason}")]
    Dataset { reason: String },

    #[error("dataset parse error at line {line}: {reason}")]
    DatasetParse { line: u64, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LinedeckError {
    fn from(err: serde_json::Error) -> Self {
        LinedeckError::Render {
            reason: err.to_string(),
        }
    }
}

impl From<&LinedeckError> for std::process::ExitCode {
    fn from(err: &LinedeckError) -> Self {
        let code: u8 = match err {
            LinedeckError::Io(_) | LinedeckError::Render { .. } => 1,
            LinedeckError::ConfigParse { .. } | LinedeckError::ConfigInvalid { .. } => 2,
            LinedeckError::Dataset { .. } | LinedeckError::DatasetParse { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
