use anyhow::bail;

use crate::cli::OutputFormat;
use crate::toggles::{self, ToggleSection};

pub async fn handle(section: &str, path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let Some(section) = ToggleSection::parse(section) else {
        bail!("unknown toggle section '{}' (expected globalNavigation, appModules or cmsExperience)", section);
    };

    let info = toggles::feature_toggle_info(section, path);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            let state = if info.enabled { "enabled" } else { "disabled" };
            match info.channel {
                Some(channel) => println!("{} [{:?}]", state, channel),
                None => println!("{}", state),
            }
        }
    }

    Ok(())
}
