use serde_json::json;

use crate::cli::OutputFormat;
use crate::extensions;

pub async fn handle(format: OutputFormat) -> anyhow::Result<()> {
    let flags = extensions::feature_flags();

    match format {
        OutputFormat::Json => {
            let resolved: Vec<_> = flags
                .iter()
                .map(|flag| {
                    json!({
                        "id": flag.id,
                        "env_var": flag.env_var,
                        "default": flag.default_enabled,
                        "enabled": flag.resolve(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        OutputFormat::Text => {
            for flag in &flags {
                let state = if flag.resolve() { "on" } else { "off" };
                let origin = if std::env::var(flag.env_var).is_ok() {
                    "env"
                } else {
                    "default"
                };
                println!("{:<16} {:<32} {:<4} ({})", flag.id, flag.env_var, state, origin);
            }
        }
    }

    Ok(())
}
