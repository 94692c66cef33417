//! The `techquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

use techquiz_providers::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
    println!("Created {CONFIG_FILE_NAME}");

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY (or edit {CONFIG_FILE_NAME})");
    println!("  2. Run: techquiz generate --level A");
    println!("  3. Run: techquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# techquiz configuration

default_provider = "gemini"
default_model = "gemini-3-flash-preview"
temperature = 0.7
max_tokens = 2048
request_timeout_secs = 120
# Extra glossary terms, merged over the built-in ones:
# glossary = "glossary.toml"

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use techquiz_providers::QuizConfig;

    #[test]
    fn sample_config_parses() {
        let config: QuizConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.providers.len(), 3);
    }
}
