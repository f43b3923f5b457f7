//! ddq - Daily Design Quote on the command line
//!
//! Shows the design quote picked for today and reads it aloud.

mod cli;
mod commands;
mod error;
mod terminal;
#[cfg(test)]
mod tests;

use clap::Parser;
use ddq_core::config::AppConfig;
use ddq_core::export::ExportFormat;

use crate::cli::{Cli, Commands};
use crate::commands::cache::run_cache;
use crate::commands::common::Context;
use crate::commands::completions::run_completions;
use crate::commands::interactive::run_interactive;
use crate::commands::mute::run_mute;
use crate::commands::notify::run_notify;
use crate::commands::prefs::run_prefs;
use crate::commands::read::run_read;
use crate::commands::theme::run_theme;
use crate::commands::today::run_today;
use crate::commands::voice::{run_voice, run_voices};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "ddq=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::new(AppConfig::from_env()?, cli.db_path);

    match cli.command {
        Some(Commands::Today {
            date,
            json,
            markdown,
            no_speak,
        }) => {
            let format = if json {
                Some(ExportFormat::Json)
            } else if markdown {
                Some(ExportFormat::Markdown)
            } else {
                None
            };
            run_today(&ctx, date, format, !no_speak).await?;
        }
        Some(Commands::Read) => run_read(&ctx).await?,
        Some(Commands::Mute) => run_mute(&ctx).await?,
        Some(Commands::Theme { theme }) => run_theme(&ctx, theme).await?,
        Some(Commands::Voices { json }) => run_voices(&ctx, json).await?,
        Some(Commands::Voice { value }) => run_voice(&ctx, &value).await?,
        Some(Commands::Prefs { json }) => run_prefs(&ctx, json).await?,
        Some(Commands::Interactive) => run_interactive(&ctx).await?,
        Some(Commands::Cache { command }) => run_cache(&ctx, command).await?,
        Some(Commands::Notify { payload, click }) => {
            run_notify(payload.as_deref(), click.as_deref())?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => run_today(&ctx, None, None, true).await?,
    }

    Ok(())
}
