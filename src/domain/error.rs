//! Domain error types.
//!
//! The indicator engine itself cannot fail; these cover configuration,
//! data acquisition and I/O around it.

/// Top-level error type for tickwatch.
#[derive(Debug, thiserror::Error)]
pub enum TickwatchError {
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

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("provider rate limit reached: {message}")]
    RateLimited { message: String },

    #[error("malformed provider response: {reason}")]
    MalformedResponse { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickwatchError> for std::process::ExitCode {
    fn from(err: &TickwatchError) -> Self {
        let code: u8 = match err {
            TickwatchError::Io(_) => 1,
            TickwatchError::ConfigParse { .. }
            | TickwatchError::ConfigMissing { .. }
            | TickwatchError::ConfigInvalid { .. } => 2,
            TickwatchError::Network { .. }
            | TickwatchError::Provider { .. }
            | TickwatchError::RateLimited { .. } => 3,
            TickwatchError::MalformedResponse { .. } | TickwatchError::Data { .. } => 4,
            TickwatchError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
