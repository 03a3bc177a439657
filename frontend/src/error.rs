use thiserror::Error;

/// Failure of a single exchange with the remote service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be an http(s) URL, got `{value}`")]
    InvalidUrl { key: &'static str, value: String },
}
