use thiserror::Error;

/// Errors raised by the course API and static map clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned error status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: u32 },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("static map credentials are not configured (set NAVER_CLIENT_ID and NAVER_CLIENT_SECRET)")]
    MissingCredentials,

    #[error("invalid static map URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("course {0} has no route data")]
    NoRoute(u32),

    #[error("course {0} has a waypoint with invalid coordinates")]
    InvalidRoute(u32),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
