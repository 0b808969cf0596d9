use serde_json::json;

use crate::cli::OutputFormat;
use crate::registry;

pub async fn handle(format: OutputFormat) -> anyhow::Result<()> {
    let registry = registry::shared_registry();

    match format {
        OutputFormat::Json => {
            let routes: Vec<_> = registry
                .routes()
                .iter()
                .map(|r| {
                    json!({
                        "path": r.path,
                        "label": r.label,
                        "extension": r.extension_id,
                        "enabled": r.enabled,
                        "match": r.match_strategy,
                        "guarded": r.guard.is_some(),
                        "toggle_section": r.toggle_section,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        OutputFormat::Text => {
            for r in registry.routes() {
                let state = if r.enabled { "enabled" } else { "disabled" };
                let guarded = if r.guard.is_some() { "guarded" } else { "open" };
                println!(
                    "{:<24} {:<16} {:<9} {:<8} {}",
                    r.path, r.label, state, guarded, r.extension_id
                );
            }
        }
    }

    Ok(())
}
