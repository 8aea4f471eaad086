mod client;
mod error;
mod types;

pub use client::{
    resolve_base_url, ApiClient, API_URL_ENV, DEFAULT_ALERT_LIMIT, DEFAULT_TIMEOUT, DEFAULT_TOKEN,
};
pub use error::ClientError;
pub use types::*;
