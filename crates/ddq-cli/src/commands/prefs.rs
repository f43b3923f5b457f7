use std::path::Path;

use ddq_core::db::load_preferences;
use ddq_core::models::Preferences;
use ddq_core::theme::resolve_theme;
use serde::Serialize;

use crate::commands::common::{Context, Storage};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct PreferencesReport {
    /// Stored theme, `None` when following the system
    pub theme: Option<String>,
    pub effective_theme: String,
    pub muted: bool,
    /// Stored voice index, empty for the default voice
    pub selected_voice: String,
    pub db_path: String,
}

pub fn preferences_report(
    prefs: &Preferences,
    system_prefers_dark: bool,
    db_path: &Path,
) -> PreferencesReport {
    PreferencesReport {
        theme: prefs.theme.map(|theme| theme.to_string()),
        effective_theme: resolve_theme(prefs.theme, system_prefers_dark).to_string(),
        muted: prefs.muted,
        selected_voice: prefs.selected_voice.clone().unwrap_or_default(),
        db_path: db_path.display().to_string(),
    }
}

pub fn format_report_lines(report: &PreferencesReport) -> Vec<String> {
    let theme = report.theme.as_ref().map_or_else(
        || format!("system ({})", report.effective_theme),
        Clone::clone,
    );
    let voice = if report.selected_voice.trim().is_empty() {
        "default".to_string()
    } else {
        report.selected_voice.clone()
    };

    vec![
        format!("theme      {theme}"),
        format!("auto-read  {}", if report.muted { "muted" } else { "on" }),
        format!("voice      {voice}"),
        format!("database   {}", report.db_path),
    ]
}

pub async fn run_prefs(ctx: &Context, as_json: bool) -> Result<(), CliError> {
    let storage = Storage::open(&ctx.db_path).await;
    let prefs = load_preferences(&storage.preferences()).await;
    let report = preferences_report(&prefs, ctx.system_prefers_dark(), &ctx.db_path);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report_lines(&report) {
            println!("{line}");
        }
    }
    Ok(())
}
