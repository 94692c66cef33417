//! The `techquiz generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use techquiz_core::generator::ScenarioGenerator;
use techquiz_core::model::Level;
use techquiz_providers::config::load_config_from;

pub async fn execute(
    level: Level,
    provider: Option<String>,
    model: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let provider = config.provider(provider.as_deref())?;
    let generator = ScenarioGenerator::new(provider, config.generator_settings(model.as_deref()));

    tracing::info!(%level, model = %generator.settings().model, "generating scenario");
    let scenario = generator.generate(level).await;

    let json = serde_json::to_string_pretty(&scenario).context("failed to serialize scenario")?;
    println!("{json}");
    Ok(())
}
