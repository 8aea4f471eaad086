use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: StatusCode },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn path(&self) -> Option<&str> {
        match self {
            ClientError::InvalidConfig(_) => None,
            ClientError::Transport { path, .. }
            | ClientError::Status { path, .. }
            | ClientError::Decode { path, .. } => Some(path),
        }
    }
}
