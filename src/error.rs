//! Error type shared by the derivations, the NWS client and the pipeline.

use thiserror::Error;

/// Alternative provider suggested when api.weather.gov cannot serve a location.
pub const ALTERNATIVE_PROVIDER: &str = "https://forecast.weather.gov";

#[derive(Error, Debug)]
pub enum Error {
    /// Geolocation was denied, timed out or was never supplied.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    /// The point lookup answered with a non-success status.
    #[error("upstream unavailable: {status} {reason}")]
    UpstreamUnavailable { status: u16, reason: String },

    #[error("malformed wind speed: {0:?}")]
    MalformedWindSpeed(String),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// A field the display depends on was absent from the payload.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn upstream<S: Into<String>>(status: u16, reason: S) -> Self {
        Self::UpstreamUnavailable {
            status,
            reason: reason.into(),
        }
    }

    /// Text shown to the end user in place of the forecast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::UpstreamUnavailable { status, reason } => format!(
                "Error: {status} {reason}. The National Weather Service does not cover this \
                 location; try {ALTERNATIVE_PROVIDER} or another provider."
            ),
            Error::LocationUnavailable(_) => {
                "Your location could not be determined; showing the fallback location.".to_string()
            }
            Error::MalformedWindSpeed(_) | Error::InvalidTimestamp(_) | Error::MissingField(_) => {
                format!("The forecast data could not be read ({self}).")
            }
            Error::Http(_) => {
                "Unable to reach api.weather.gov. Please check your internet connection."
                    .to_string()
            }
            Error::Json(_) | Error::Io(_) | Error::Config(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_recommends_alternative() {
        let err = Error::upstream(404, "Not Found");
        let msg = err.user_message();
        assert!(msg.starts_with("Error: 404 Not Found"));
        assert!(msg.contains(ALTERNATIVE_PROVIDER));
    }

    #[test]
    fn test_data_errors_are_reported() {
        let err = Error::MalformedWindSpeed("calm".to_string());
        assert!(err.user_message().contains("calm"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(Error::from(io_err), Error::Io(_)));
    }
}
