use anyhow::Context;
use citybike_skill::config::cli::{read_event, render_response};
use citybike_skill::utils::{logger, validation::Validate};
use citybike_skill::{CliConfig, HttpSkillHandler};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting citybike-skill CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config = cli.skill_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let event = read_event(&cli.event)
        .with_context(|| format!("failed to read event from {}", cli.event.display()))?;

    let handler = HttpSkillHandler::from_config(&config)?;
    let response = handler.handle_json(event).await?;

    println!("{}", render_response(&response)?);
    Ok(())
}
