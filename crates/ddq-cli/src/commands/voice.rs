use ddq_core::db::{read_or_default, write_best_effort, PreferenceStore};
use ddq_core::models::{voice_options, Voice, SELECTED_VOICE_KEY};
use ddq_core::speech::{
    load_voices, resolve_voice, SpeechEngine, VOICE_RETRY_ATTEMPTS, VOICE_RETRY_INTERVAL,
};
use serde::Serialize;

use crate::commands::common::{Context, Storage};
use crate::error::CliError;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VoiceListItem {
    /// Picker value; empty for the default voice
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Picker entries with the effective selection marked. A stored index that
/// no longer exists selects the default voice.
pub fn voice_list(voices: &[Voice], stored: Option<&str>) -> Vec<VoiceListItem> {
    let selected = if resolve_voice(voices, stored).is_some() {
        stored.map(str::trim).unwrap_or_default()
    } else {
        ""
    };

    voice_options(voices)
        .into_iter()
        .map(|option| VoiceListItem {
            selected: option.value == selected,
            value: option.value,
            label: option.label,
        })
        .collect()
}

pub fn format_voice_lines(items: &[VoiceListItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let marker = if item.selected { '*' } else { ' ' };
            let value = if item.value.is_empty() {
                "default"
            } else {
                item.value.as_str()
            };
            format!("{marker} {value:>7}  {}", item.label)
        })
        .collect()
}

/// Normalize `default` / index input into the stored picker value
pub fn parse_voice_value(value: &str) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("default") {
        return Ok(String::new());
    }
    trimmed
        .parse::<usize>()
        .map(|index| index.to_string())
        .map_err(|_| CliError::InvalidVoice(trimmed.to_string()))
}

async fn engine_voices<E: SpeechEngine>(engine: &E) -> Vec<Voice> {
    load_voices(engine, VOICE_RETRY_ATTEMPTS, VOICE_RETRY_INTERVAL).await
}

pub async fn run_voices(ctx: &Context, as_json: bool) -> Result<(), CliError> {
    let engine = ctx.require_speech_engine()?;
    let voices = engine_voices(&engine).await;
    let storage = Storage::open(&ctx.db_path).await;
    let stored = read_or_default(&storage.preferences(), SELECTED_VOICE_KEY).await;
    let items = voice_list(&voices, stored.as_deref());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_voice_lines(&items) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Persist a voice choice verbatim; the engine's list is only consulted for
/// feedback
pub async fn store_voice<S: PreferenceStore>(store: &S, value: &str) {
    write_best_effort(store, SELECTED_VOICE_KEY, value).await;
}

pub async fn run_voice(ctx: &Context, value: &str) -> Result<(), CliError> {
    let value = parse_voice_value(value)?;
    let storage = Storage::open(&ctx.db_path).await;
    store_voice(&storage.preferences(), &value).await;

    if value.is_empty() {
        println!("Using the default voice");
        return Ok(());
    }

    let voices = match ctx.speech_engine() {
        Some(engine) => engine_voices(&engine).await,
        None => Vec::new(),
    };
    match resolve_voice(&voices, Some(&value)) {
        Some(voice) => println!("Using {}", voice.label()),
        None => println!("Voice {value} is not available; the default voice will be used"),
    }
    Ok(())
}
