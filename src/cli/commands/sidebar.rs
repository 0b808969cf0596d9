use crate::cli::OutputFormat;
use crate::registry;

pub async fn handle(format: OutputFormat) -> anyhow::Result<()> {
    let registry = registry::shared_registry();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(registry.sidebar())?);
        }
        OutputFormat::Text => {
            for section in registry.sidebar() {
                println!("{}", section.title);
                for item in &section.items {
                    let marker = if item.disabled { " (disabled)" } else { "" };
                    println!("  {:<22} {}{}", item.path, item.label, marker);
                }
            }
        }
    }

    Ok(())
}
