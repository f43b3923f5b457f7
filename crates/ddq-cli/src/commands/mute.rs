use ddq_core::db::{load_preferences, write_best_effort, PreferenceStore};
use ddq_core::models::{Preferences, MUTE_STATUS_KEY};

use crate::commands::common::{Context, Storage};
use crate::error::CliError;

/// Flip the stored mute flag; returns the new value
pub async fn toggle_muted<S: PreferenceStore>(store: &S) -> bool {
    let muted = !load_preferences(store).await.muted;
    write_best_effort(store, MUTE_STATUS_KEY, Preferences::encode_muted(muted)).await;
    muted
}

pub async fn run_mute(ctx: &Context) -> Result<(), CliError> {
    let storage = Storage::open(&ctx.db_path).await;
    if toggle_muted(&storage.preferences()).await {
        println!("Auto-read muted");
    } else {
        println!("Auto-read unmuted");
    }
    Ok(())
}
