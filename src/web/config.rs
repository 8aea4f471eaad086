use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::api::{
    resolve_base_url, ApiClient, ClientError, API_URL_ENV, DEFAULT_ALERT_LIMIT, DEFAULT_TIMEOUT,
    DEFAULT_TOKEN,
};
use crate::content::DEFAULT_SITE_URL;
use crate::feeds::{
    FallbackPolicy, FeedSchedule, CATALOG_PERIOD, CONJUNCTION_PERIOD, INTELLIGENCE_PERIOD,
    METRICS_PERIOD,
};
use crate::tracking::DEFAULT_TRACKING_PERIOD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub conjunctions: ConjunctionsConfig,
    pub station: StationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub site_url: String,
    pub static_dir: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            static_dir: "src/web/static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Falls back to `$CRYPTIK_API_URL`, then the hosted backend.
    pub base_url: Option<String>,
    pub token: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: DEFAULT_TOKEN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> String {
        resolve_base_url(self.base_url.as_deref(), std::env::var(API_URL_ENV).ok())
    }

    pub fn client(&self) -> Result<ApiClient, ClientError> {
        ApiClient::new(&self.base_url(), &self.token, self.timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    #[serde(with = "humantime_serde")]
    pub tracking: Duration,
    #[serde(with = "humantime_serde")]
    pub catalog: Duration,
    #[serde(with = "humantime_serde")]
    pub conjunctions: Duration,
    #[serde(with = "humantime_serde")]
    pub intelligence: Duration,
    #[serde(with = "humantime_serde")]
    pub metrics: Duration,
    pub alerts_limit: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            tracking: DEFAULT_TRACKING_PERIOD,
            catalog: CATALOG_PERIOD,
            conjunctions: CONJUNCTION_PERIOD,
            intelligence: INTELLIGENCE_PERIOD,
            metrics: METRICS_PERIOD,
            alerts_limit: DEFAULT_ALERT_LIMIT,
        }
    }
}

impl PollingConfig {
    pub fn schedule(&self) -> FeedSchedule {
        FeedSchedule {
            catalog: self.catalog,
            conjunctions: self.conjunctions,
            intelligence: self.intelligence,
            metrics: self.metrics,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConjunctionsConfig {
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub name: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: "NORTH_VALLEY_A".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("api.timeout", self.api.timeout),
            ("polling.tracking", self.polling.tracking),
            ("polling.catalog", self.polling.catalog),
            ("polling.conjunctions", self.polling.conjunctions),
            ("polling.intelligence", self.polling.intelligence),
            ("polling.metrics", self.polling.metrics),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::Invalid(format!("{} must be greater than zero", name)));
        }
        if self.polling.alerts_limit == 0 {
            return Err(ConfigError::Invalid(
                "polling.alerts_limit must be greater than zero".to_string(),
            ));
        }
        if self.web.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("web.bind is empty".to_string()));
        }
        Ok(())
    }
}

mod humantime_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
    }
}
