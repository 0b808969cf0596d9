pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Nimbus CLI - inspect the portal's routes, flags and guards")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List every registered route with its derived state")]
    Routes,

    #[command(about = "Print the sidebar tree as the UI receives it")]
    Sidebar,

    #[command(about = "Show every feature flag and its resolved value")]
    Flags,

    #[command(about = "Resolve a path against the feature toggle tree")]
    Toggles {
        #[arg(help = "Toggle section: globalNavigation, appModules or cmsExperience")]
        section: String,
        #[arg(help = "Pathname to resolve")]
        path: String,
    },

    #[command(about = "Evaluate route guards for a hypothetical caller")]
    Access {
        #[arg(help = "Pathname to check")]
        path: String,
        #[arg(long, help = "Caller role (guest, user, operator, admin)")]
        role: Option<String>,
        #[arg(long = "perm", help = "Permission held by the caller (repeatable)")]
        permissions: Vec<String>,
    },
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output_format();

    match cli.command {
        Commands::Routes => commands::routes::handle(format).await,
        Commands::Sidebar => commands::sidebar::handle(format).await,
        Commands::Flags => commands::flags::handle(format).await,
        Commands::Toggles { section, path } => {
            commands::toggles::handle(&section, &path, format).await
        }
        Commands::Access {
            path,
            role,
            permissions,
        } => commands::access::handle(&path, role.as_deref(), permissions, format).await,
    }
}
