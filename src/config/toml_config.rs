use crate::domain::ports::{
    ConfigProvider, DEFAULT_GEOCODER_ENDPOINT, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_STATIONS_ENDPOINT, DEFAULT_USER_AGENT,
};
use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{validate_provider, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Skill settings loaded from a TOML file. Every section is optional;
/// missing values fall back to the public HSL endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillFileConfig {
    #[serde(default)]
    pub skill: SkillSection,
    #[serde(default)]
    pub stations: StationsSection,
    #[serde(default)]
    pub geocoder: GeocoderSection,
    #[serde(default)]
    pub http: HttpSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSection {
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationsSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocoderSection {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub timeout_secs: Option<u64>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl SkillFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        let mut config: Self = toml::from_str(&processed_content)?;

        // 未設定的環境變數視為缺少該值
        if config.stations.api_key.as_deref().is_some_and(is_placeholder) {
            tracing::warn!("⚠️ stations.api_key refers to an unset environment variable");
            config.stations.api_key = None;
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${ALEXA_APPLICATION_ID})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

fn is_placeholder(value: &str) -> bool {
    env_var_pattern().is_match(value)
}

impl ConfigProvider for SkillFileConfig {
    fn application_id(&self) -> &str {
        self.skill.application_id.as_deref().unwrap_or("")
    }

    fn stations_endpoint(&self) -> &str {
        self.stations
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_STATIONS_ENDPOINT)
    }

    fn stations_api_key(&self) -> Option<&str> {
        self.stations.api_key.as_deref()
    }

    fn geocoder_endpoint(&self) -> &str {
        self.geocoder
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEOCODER_ENDPOINT)
    }

    fn user_agent(&self) -> &str {
        self.geocoder
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn http_timeout_secs(&self) -> u64 {
        self.http.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }
}

impl Validate for SkillFileConfig {
    fn validate(&self) -> Result<()> {
        let application_id =
            validate_required_field("skill.application_id", &self.skill.application_id)?;
        if is_placeholder(application_id) {
            return Err(SkillError::InvalidConfigValueError {
                field: "skill.application_id".to_string(),
                value: application_id.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        validate_provider(self)?;
        tracing::debug!("✅ Skill configuration validation passed");
        Ok(())
    }
}
