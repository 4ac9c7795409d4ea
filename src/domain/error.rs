//! Domain error types.

/// Top-level error type for quantbt.
#[derive(Debug, thiserror::Error)]
pub enum QuantbtError {
    #[error("data shape error: {reason}")]
    DataShape { reason: String },

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no price data for {ticker}")]
    NoData { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantbtError> for std::process::ExitCode {
    fn from(err: &QuantbtError) -> Self {
        let code: u8 = match err {
            QuantbtError::Io(_) => 1,
            QuantbtError::ConfigParse { .. }
            | QuantbtError::ConfigMissing { .. }
            | QuantbtError::ConfigInvalid { .. } => 2,
            QuantbtError::Data { .. } | QuantbtError::NoData { .. } => 3,
            QuantbtError::DataShape { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
