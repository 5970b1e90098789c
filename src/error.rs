// Error types for the planets application.
// Separates connectivity failures from other remote failures so the repository can fall back to the cache.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanetError {
    /// Connectivity-class transport failure (DNS, refused or dropped connection, timeout).
    #[error("No network connection available")]
    NoNetwork,

    /// Any other remote failure: bad status, malformed body, other transport errors.
    #[error("{0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PlanetError {
    /// Classify a transport error by category.
    ///
    /// Failures to reach the server or to finish the exchange (connect, timeout,
    /// dropped connection, truncated body, any I/O error underneath) are
    /// `NoNetwork`. A body that arrived but does not decode stays `Remote`.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if has_source::<serde_json::Error>(&err) {
            return PlanetError::Remote(err.to_string());
        }

        let lost_connection = err.is_connect()
            || err.is_timeout()
            || err.is_request()
            || err.is_body()
            || has_source::<std::io::Error>(&err);
        if lost_connection {
            PlanetError::NoNetwork
        } else {
            PlanetError::Remote(err.to_string())
        }
    }

    pub fn is_no_network(&self) -> bool {
        matches!(self, PlanetError::NoNetwork)
    }
}

/// Whether any error in the source chain of `err` is a `T`.
fn has_source<T: std::error::Error + 'static>(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<T>() {
            return true;
        }
        source = cause.source();
    }
    false
}

pub type Result<T> = std::result::Result<T, PlanetError>;
