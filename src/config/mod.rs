#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::SkillFileConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Runs one skill event locally against the live providers.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "citybike-skill")]
#[command(about = "Answer a city bikes skill event from a JSON file")]
pub struct CliConfig {
    /// Path to the JSON request event
    #[arg(long)]
    pub event: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long)]
    pub stations_endpoint: Option<String>,

    #[arg(long)]
    pub stations_api_key: Option<String>,

    #[arg(long)]
    pub geocoder_endpoint: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub http_timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file, if any, and applies the command line overrides.
    pub fn skill_config(&self) -> Result<SkillFileConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                SkillFileConfig::from_file(path)?
            }
            None => SkillFileConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(application_id) = &self.application_id {
            config.skill.application_id = Some(application_id.clone());
        }
        if let Some(endpoint) = &self.stations_endpoint {
            config.stations.endpoint = Some(endpoint.clone());
        }
        if let Some(api_key) = &self.stations_api_key {
            config.stations.api_key = Some(api_key.clone());
        }
        if let Some(endpoint) = &self.geocoder_endpoint {
            config.geocoder.endpoint = Some(endpoint.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config.geocoder.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.http_timeout_secs {
            config.http.timeout_secs = Some(timeout);
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[skill]\napplication_id = \"amzn1.ask.skill.file\"\n[http]\ntimeout_secs = 9\n",
            )
            .unwrap();

        let cli = CliConfig::parse_from([
            "citybike-skill",
            "--event",
            "event.json",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--application-id",
            "amzn1.ask.skill.flag",
        ]);

        let config = cli.skill_config().unwrap();
        assert_eq!(config.application_id(), "amzn1.ask.skill.flag");
        assert_eq!(config.http_timeout_secs(), 9);
    }

    #[test]
    fn test_without_config_file() {
        let cli = CliConfig::parse_from(["citybike-skill", "--event", "event.json"]);
        let config = cli.skill_config().unwrap();
        assert_eq!(config.application_id(), "");
    }
}
