//! Error taxonomy for the portal.
//!
//! Network and HTTP failures are first-class here: views turn them into a
//! visible failed state instead of dropping them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("route {0} has no view in this portal")]
    UnsupportedRoute(String),

    #[error("no button labelled {label:?} at index {index}")]
    NoSuchButton { label: String, index: usize },

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
