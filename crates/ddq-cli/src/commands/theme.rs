use ddq_core::db::{write_best_effort, PreferenceStore};
use ddq_core::models::{Theme, THEME_KEY};
use ddq_core::theme::resolve_theme;

use crate::cli::ThemeChoice;
use crate::commands::common::{Context, Storage};
use crate::error::CliError;

/// Store a theme choice; `system` clears it. Returns the theme now in effect.
pub async fn store_theme<S: PreferenceStore>(
    store: &S,
    choice: ThemeChoice,
    system_prefers_dark: bool,
) -> Theme {
    let stored = match choice {
        ThemeChoice::Light => Some(Theme::Light),
        ThemeChoice::Dark => Some(Theme::Dark),
        ThemeChoice::System => None,
    };
    write_best_effort(store, THEME_KEY, stored.map_or("", Theme::as_str)).await;
    resolve_theme(stored, system_prefers_dark)
}

pub async fn run_theme(ctx: &Context, choice: ThemeChoice) -> Result<(), CliError> {
    let storage = Storage::open(&ctx.db_path).await;
    let theme = store_theme(&storage.preferences(), choice, ctx.system_prefers_dark()).await;

    if choice == ThemeChoice::System {
        println!("Following system theme (currently {theme})");
    } else {
        println!("Theme set to {theme}");
    }
    Ok(())
}
