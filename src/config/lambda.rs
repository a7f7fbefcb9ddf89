use crate::domain::ports::{
    ConfigProvider, DEFAULT_GEOCODER_ENDPOINT, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_STATIONS_ENDPOINT, DEFAULT_USER_AGENT,
};
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{validate_provider, Validate};
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub application_id: String,
    pub stations_endpoint: String,
    pub stations_api_key: Option<String>,
    pub geocoder_endpoint: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> Result<Self> {
        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .map_err(|_| SkillError::InvalidConfigValueError {
                    field: "HTTP_TIMEOUT_SECS".to_string(),
                    value: value.clone(),
                    reason: "Value must be a whole number of seconds".to_string(),
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            application_id: var("ALEXA_APPLICATION_ID").ok_or_else(|| SkillError::ConfigError {
                message: "ALEXA_APPLICATION_ID environment variable is required".to_string(),
            })?,
            stations_endpoint: var("STATIONS_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_STATIONS_ENDPOINT.to_string()),
            stations_api_key: var("STATIONS_API_KEY").filter(|key| !key.is_empty()),
            geocoder_endpoint: var("GEOCODER_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEOCODER_ENDPOINT.to_string()),
            user_agent: var("GEOCODER_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            http_timeout_secs,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn application_id(&self) -> &str {
        &self.application_id
    }

    fn stations_endpoint(&self) -> &str {
        &self.stations_endpoint
    }

    fn stations_api_key(&self) -> Option<&str> {
        self.stations_api_key.as_deref()
    }

    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder_endpoint
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn http_timeout_secs(&self) -> u64 {
        self.http_timeout_secs
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
