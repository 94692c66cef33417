//! The `techquiz list-models` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use techquiz_providers::config::{create_provider, load_config_from, ProviderConfig};
use techquiz_providers::ollama::OllamaProvider;

pub async fn execute(provider_filter: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    let mut table = Table::new();
    table.set_header(vec!["Provider", "Model", "Name", "Context"]);
    let mut found_any = false;

    for name in names {
        if provider_filter.as_ref().is_some_and(|filter| filter != name) {
            continue;
        }
        let provider_config = &config.providers[name];

        let models = match provider_config {
            // Local models are only known to the running instance.
            ProviderConfig::Ollama { base_url } => {
                let ollama = OllamaProvider::new(base_url, config.request_timeout_secs)?;
                match ollama.list_models_async().await {
                    Ok(models) => models,
                    Err(e) => {
                        eprintln!("Warning: {name}: {e:#}");
                        continue;
                    }
                }
            }
            _ => match create_provider(provider_config, config.request_timeout_secs) {
                Ok(provider) => provider.available_models(),
                Err(e) => {
                    eprintln!("Warning: {name}: {e:#}");
                    continue;
                }
            },
        };

        for model in &models {
            found_any = true;
            let context = if model.max_context == 0 {
                "-".to_string()
            } else {
                format!("{}K", model.max_context / 1000)
            };
            table.add_row(vec![
                Cell::new(name),
                Cell::new(&model.id),
                Cell::new(&model.name),
                Cell::new(context),
            ]);
        }
    }

    if found_any {
        println!("{table}");
    } else {
        println!("No providers configured. Run `techquiz init` to create a config file.");
    }

    Ok(())
}
