use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use ddq_core::config::AppConfig;
use ddq_core::cache::{AssetResponse, ResponseKind};
use ddq_core::db::{CacheRepository, MemoryPreferenceStore, PreferenceStore};
use ddq_core::export::ExportFormat;
use ddq_core::models::{Preferences, Theme, Voice, MUTE_STATUS_KEY, THEME_KEY};
use ddq_core::session::{DailyQuoteSession, SessionTiming};
use ddq_core::speech::CommandSpeechEngine;
use ddq_core::state::Shortcut;
use ddq_core::QuoteBook;
use pretty_assertions::assert_eq;

use crate::cli::{CacheCommands, Cli, Commands, CompletionShell, ThemeChoice};
use crate::commands::common::{default_db_path, resolve_db_path, Storage};
use crate::commands::completions::completion_script;
use crate::commands::interactive::{apply_command, parse_command, InteractiveCommand};
use crate::commands::mute::toggle_muted;
use crate::commands::notify::build_notification;
use crate::commands::prefs::{format_report_lines, preferences_report};
use crate::commands::theme::store_theme;
use crate::commands::today::render_quote_of_the_day;
use crate::commands::voice::{format_voice_lines, parse_voice_value, voice_list};
use crate::error::CliError;
use crate::terminal::TerminalView;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn two_voices() -> Vec<Voice> {
    vec![Voice::new("English", "en"), Voice::new("German", "de")]
}

type TerminalSession =
    DailyQuoteSession<MemoryPreferenceStore, CommandSpeechEngine, TerminalView<Vec<u8>>>;

fn terminal_session(store: MemoryPreferenceStore, announce_status: bool) -> TerminalSession {
    DailyQuoteSession::new(
        store,
        None,
        TerminalView::new(Vec::new(), announce_status),
        QuoteBook::builtin(),
    )
    .with_timing(SessionTiming::immediate())
}

#[test]
fn cli_defaults_to_no_subcommand() {
    let cli = Cli::try_parse_from(["ddq"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.db_path.is_none());
}

#[test]
fn cli_parses_today_options() {
    let cli = Cli::try_parse_from(["ddq", "today", "--date", "2026-10-17", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Today {
            date: parsed,
            json,
            markdown,
            no_speak,
        }) => {
            assert_eq!(parsed, Some(date(2026, 10, 17)));
            assert!(json);
            assert!(!markdown);
            assert!(!no_speak);
        }
        _ => panic!("expected today command"),
    }
}

#[test]
fn cli_rejects_json_with_markdown() {
    assert!(Cli::try_parse_from(["ddq", "today", "--json", "--markdown"]).is_err());
}

#[test]
fn cli_accepts_global_db_path_after_subcommand() {
    let cli = Cli::try_parse_from(["ddq", "mute", "--db-path", "/tmp/ddq.db"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Mute)));
    assert_eq!(cli.db_path, Some(PathBuf::from("/tmp/ddq.db")));
}

#[test]
fn cli_parses_theme_and_cache_commands() {
    let cli = Cli::try_parse_from(["ddq", "theme", "system"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Theme {
            theme: ThemeChoice::System
        })
    ));

    let cli = Cli::try_parse_from(["ddq", "cache", "fetch", "/", "--navigate"]).unwrap();
    match cli.command {
        Some(Commands::Cache {
            command: CacheCommands::Fetch { url, navigate, .. },
        }) => {
            assert_eq!(url, "/");
            assert!(navigate);
        }
        _ => panic!("expected cache fetch command"),
    }

    let cli = Cli::try_parse_from(["ddq", "cache", "sync"]).unwrap();
    match cli.command {
        Some(Commands::Cache {
            command: CacheCommands::Sync { tag },
        }) => assert_eq!(tag, "background-sync"),
        _ => panic!("expected cache sync command"),
    }
}

#[test]
fn resolve_db_path_prefers_flag_then_environment() {
    let config = AppConfig {
        db_path: Some(PathBuf::from("/env/ddq.db")),
        ..AppConfig::default()
    };

    assert_eq!(
        resolve_db_path(Some(PathBuf::from("/flag/ddq.db")), &config),
        PathBuf::from("/flag/ddq.db")
    );
    assert_eq!(resolve_db_path(None, &config), PathBuf::from("/env/ddq.db"));
    assert_eq!(
        resolve_db_path(None, &AppConfig::default()),
        default_db_path()
    );
    assert!(default_db_path().ends_with("ddq/ddq.db"));
}

#[test]
fn render_quote_of_the_day_formats() {
    let json = render_quote_of_the_day(date(2026, 10, 17), ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["author"], "Hans Hofmann");
    assert_eq!(value["index"], 35);
    assert_eq!(value["display_date"], "Saturday, October 17, 2026");

    let markdown = render_quote_of_the_day(date(2026, 10, 17), ExportFormat::Markdown).unwrap();
    assert!(markdown.contains("## Saturday, October 17, 2026"));
}

#[test]
fn parse_voice_value_accepts_index_or_default() {
    assert_eq!(parse_voice_value("default").unwrap(), "");
    assert_eq!(parse_voice_value("  ").unwrap(), "");
    assert_eq!(parse_voice_value(" 2 ").unwrap(), "2");
    assert!(matches!(
        parse_voice_value("english"),
        Err(CliError::InvalidVoice(value)) if value == "english"
    ));
}

#[test]
fn voice_list_marks_effective_selection() {
    let voices = two_voices();

    let items = voice_list(&voices, Some("1"));
    assert_eq!(items.len(), 3);
    assert!(items[2].selected);
    assert_eq!(items[2].label, "German (de)");

    // Out-of-range index falls back to the default voice
    let items = voice_list(&voices, Some("3"));
    assert!(items[0].selected);
    assert!(items.iter().skip(1).all(|item| !item.selected));

    let lines = format_voice_lines(&items);
    assert_eq!(lines[0], "* default  Default Voice");
    assert_eq!(lines[1], "        0  English (en)");
}

#[test]
fn parse_interactive_commands() {
    assert_eq!(
        parse_command(""),
        Some(InteractiveCommand::Shortcut(Shortcut::ReadAgain))
    );
    assert_eq!(
        parse_command("m"),
        Some(InteractiveCommand::Shortcut(Shortcut::ToggleMute))
    );
    assert_eq!(parse_command("t"), Some(InteractiveCommand::ToggleTheme));
    assert_eq!(
        parse_command("theme Dark"),
        Some(InteractiveCommand::Theme(Some(Theme::Dark)))
    );
    assert_eq!(
        parse_command("t system"),
        Some(InteractiveCommand::Theme(None))
    );
    assert_eq!(
        parse_command("v 1"),
        Some(InteractiveCommand::Voice("1".to_string()))
    );
    assert_eq!(
        parse_command("voice default"),
        Some(InteractiveCommand::Voice(String::new()))
    );
    assert_eq!(parse_command("q"), Some(InteractiveCommand::Quit));
    assert_eq!(parse_command("t purple"), None);
    assert_eq!(parse_command("dance"), None);
}

#[tokio::test(flavor = "current_thread")]
async fn terminal_view_prints_dated_quote() {
    let mut session = terminal_session(MemoryPreferenceStore::new(), false);
    session.initialize(date(2026, 10, 17), false).await.unwrap();

    let session_view = std::mem::replace(session.view_mut(), TerminalView::new(Vec::new(), false));
    let output = String::from_utf8(session_view.into_inner()).unwrap();
    assert_eq!(
        output,
        "Saturday, October 17, 2026\n\n  \u{201c}Design is the intermediary between information and understanding.\u{201d}\n    \u{2014} Hans Hofmann\n"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn terminal_status_line_without_speech() {
    let mut session = terminal_session(MemoryPreferenceStore::new(), true);
    session.initialize(date(2026, 10, 17), true).await.unwrap();

    assert_eq!(
        session.view().status_line(),
        "theme: dark | speech unavailable | read again disabled"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn interactive_theme_commands_update_session() {
    let mut session = terminal_session(MemoryPreferenceStore::new(), true);
    session.initialize(date(2026, 10, 17), false).await.unwrap();

    apply_command(&mut session, InteractiveCommand::ToggleTheme, false).await;
    assert_eq!(session.theme(), Theme::Dark);
    assert_eq!(
        session.store().get(THEME_KEY).await.unwrap().as_deref(),
        Some("dark")
    );

    apply_command(&mut session, InteractiveCommand::Theme(None), false).await;
    assert_eq!(session.theme(), Theme::Light);
    assert_eq!(session.stored_theme(), None);

    apply_command(&mut session, InteractiveCommand::Voice("1".to_string()), false).await;
    assert_eq!(session.view().selected_voice(), "1");
}

#[tokio::test(flavor = "current_thread")]
async fn toggle_muted_twice_restores_flag() {
    let store = MemoryPreferenceStore::new();

    assert!(toggle_muted(&store).await);
    assert_eq!(
        store.get(MUTE_STATUS_KEY).await.unwrap().as_deref(),
        Some("true")
    );

    assert!(!toggle_muted(&store).await);
    assert_eq!(
        store.get(MUTE_STATUS_KEY).await.unwrap().as_deref(),
        Some("false")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn store_theme_system_clears_choice() {
    let store = MemoryPreferenceStore::new();

    assert_eq!(store_theme(&store, ThemeChoice::Light, true).await, Theme::Light);
    assert_eq!(
        store.get(THEME_KEY).await.unwrap().as_deref(),
        Some("light")
    );

    assert_eq!(store_theme(&store, ThemeChoice::System, true).await, Theme::Dark);
    assert_eq!(store.get(THEME_KEY).await.unwrap().as_deref(), Some(""));
}

#[test]
fn preferences_report_lines() {
    let prefs = Preferences {
        theme: None,
        muted: true,
        selected_voice: Some("2".to_string()),
    };
    let report = preferences_report(&prefs, true, &PathBuf::from("/data/ddq.db"));

    assert_eq!(report.theme, None);
    assert_eq!(report.effective_theme, "dark");
    assert_eq!(
        format_report_lines(&report),
        vec![
            "theme      system (dark)".to_string(),
            "auto-read  muted".to_string(),
            "voice      2".to_string(),
            "database   /data/ddq.db".to_string(),
        ]
    );
}

#[cfg_attr(windows, ignore = "libsql integration is flaky on windows CI")]
#[tokio::test(flavor = "current_thread")]
async fn storage_persists_preferences_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("ddq.db");

    {
        let storage = Storage::open(&db_path).await;
        storage.preferences().set(THEME_KEY, "dark").await.unwrap();
    }

    let storage = Storage::open(&db_path).await;
    assert_eq!(
        storage.preferences().get(THEME_KEY).await.unwrap().as_deref(),
        Some("dark")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn storage_keeps_cache_entries_in_memory_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let storage = Storage::open(&blocker.join("ddq.db")).await;
    assert!(!storage.is_durable());

    let response = AssetResponse {
        url: "/index.html".to_string(),
        status: 200,
        kind: ResponseKind::Basic,
        content_type: Some("text/html".to_string()),
        body: b"<html>".to_vec(),
    };
    storage
        .cache_entries()
        .put("v1", "/index.html", &response)
        .await
        .unwrap();

    let cache = storage.cache_entries();
    assert_eq!(cache.count("v1").await.unwrap(), 1);
    assert_eq!(cache.cache_names().await.unwrap(), vec!["v1"]);
    let found = cache.find("/index.html").await.unwrap().unwrap();
    assert_eq!(found.body, b"<html>".to_vec());
}

#[test]
fn database_errors_surface_through_core_error() {
    let error = CliError::from(ddq_core::Error::Database("disk full".to_string()));
    assert!(matches!(error, CliError::Core(_)));
    assert_eq!(error.to_string(), "Database error: disk full");
}

#[tokio::test(flavor = "current_thread")]
async fn storage_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let storage = Storage::open(&blocker.join("ddq.db")).await;
    let store = storage.preferences();
    store.set(MUTE_STATUS_KEY, "true").await.unwrap();
    assert_eq!(
        store.get(MUTE_STATUS_KEY).await.unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn build_notification_for_quote_and_payload() {
    let notification = build_notification(None, date(2026, 10, 17), 1_000).unwrap();
    assert_eq!(notification.title, "Daily Design Quote");
    assert!(notification.options.body.contains("Hans Hofmann"));
    assert_eq!(notification.options.data.primary_key, serde_json::json!(290));
    assert_eq!(notification.options.data.date_of_arrival, 1_000);

    let notification = build_notification(
        Some(r#"{"title":"Hello","body":"World","primaryKey":1}"#),
        date(2026, 10, 17),
        5,
    )
    .unwrap();
    assert_eq!(notification.title, "Hello");
    assert_eq!(notification.options.actions.len(), 2);

    assert!(matches!(
        build_notification(Some("not json"), date(2026, 10, 17), 5),
        Err(CliError::Core(_))
    ));
}

#[test]
fn completion_scripts_name_the_binary() {
    for shell in [CompletionShell::Bash, CompletionShell::Zsh, CompletionShell::Fish] {
        let script = String::from_utf8(completion_script(shell)).unwrap();
        assert!(script.contains("ddq"));
    }
}
