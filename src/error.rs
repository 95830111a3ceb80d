use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// These are fatal at startup only; a running pipeline never raises them.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure modes of a funding-data fetch.
///
/// All variants are contained within a single pipeline run and rendered
/// as an error report instead of propagating.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("funding request timed out")]
    Timeout,

    #[error("funding request failed: {0}")]
    Transport(String),

    #[error("funding endpoint returned status {0}")]
    BadStatus(u16),

    #[error("funding payload could not be parsed: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::BadStatus(status.as_u16())
        } else if err.is_decode() {
            Self::MalformedPayload(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failure of a notification delivery.
///
/// Isolated at the dispatcher boundary; never affects scheduler state.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("failed to send message: {0}")]
    Send(String),

    #[error("notification channel closed")]
    ChannelClosed,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages_are_distinct() {
        let messages = [
            FetchError::Timeout.to_string(),
            FetchError::Transport("connection refused".into()).to_string(),
            FetchError::BadStatus(502).to_string(),
            FetchError::MalformedPayload("expected array".into()).to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn bad_status_carries_code() {
        assert_eq!(
            FetchError::BadStatus(429).to_string(),
            "funding endpoint returned status 429"
        );
    }
}
