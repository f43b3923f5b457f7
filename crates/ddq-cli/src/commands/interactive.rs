use std::io::Write;

use ddq_core::db::PreferenceStore;
use ddq_core::models::Theme;
use ddq_core::selector::today;
use ddq_core::session::DailyQuoteSession;
use ddq_core::speech::{SpeechEngine, SpeechOutcome};
use ddq_core::state::Shortcut;
use ddq_core::QuoteBook;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{Context, Storage};
use crate::commands::voice::{format_voice_lines, parse_voice_value, voice_list};
use crate::error::CliError;
use crate::terminal::TerminalView;

const HELP: &str = "Enter: read again | m: mute | t [light|dark|system]: theme | \
v <n|default>: voice | voices | h: hide | s: status | q: quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Shortcut(Shortcut),
    ToggleTheme,
    /// Explicit theme, `None` to follow the system again
    Theme(Option<Theme>),
    Voice(String),
    Voices,
    Hide,
    Status,
    Help,
    Quit,
}

/// Parse one input line. An empty line is a Space press on the page.
pub fn parse_command(line: &str) -> Option<InteractiveCommand> {
    if line.trim().is_empty() {
        return Shortcut::from_key(" ", false, true).map(InteractiveCommand::Shortcut);
    }

    let mut parts = line.split_whitespace();
    let word = parts.next()?.to_ascii_lowercase();
    let arg = parts.next();

    match word.as_str() {
        "r" | "read" => Some(InteractiveCommand::Shortcut(Shortcut::ReadAgain)),
        "m" | "mute" | "ctrl-m" => {
            Shortcut::from_key("m", true, false).map(InteractiveCommand::Shortcut)
        }
        "t" | "theme" => match arg {
            None => Some(InteractiveCommand::ToggleTheme),
            Some(value) if value.eq_ignore_ascii_case("system") => {
                Some(InteractiveCommand::Theme(None))
            }
            Some(value) => value
                .parse::<Theme>()
                .ok()
                .map(|theme| InteractiveCommand::Theme(Some(theme))),
        },
        "v" | "voice" => parse_voice_value(arg.unwrap_or_default())
            .ok()
            .map(InteractiveCommand::Voice),
        "voices" => Some(InteractiveCommand::Voices),
        "h" | "hide" => Some(InteractiveCommand::Hide),
        "s" | "status" => Some(InteractiveCommand::Status),
        "?" | "help" => Some(InteractiveCommand::Help),
        "q" | "quit" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

pub async fn run_interactive(ctx: &Context) -> Result<(), CliError> {
    let system_prefers_dark = ctx.system_prefers_dark();
    let storage = Storage::open(&ctx.db_path).await;
    let mut session = DailyQuoteSession::new(
        storage.preferences(),
        ctx.speech_engine(),
        TerminalView::stdout(true),
        QuoteBook::builtin(),
    );
    session.start(today(), system_prefers_dark).await?;
    println!("{HELP}");

    let engine = session.speech_engine();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let speaking = session.is_speaking();
        tokio::select! {
            outcome = reading_finished(engine.as_deref()), if speaking => {
                session.on_speech_finished(outcome);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Some(InteractiveCommand::Quit) => break,
                    Some(command) => apply_command(&mut session, command, system_prefers_dark).await,
                    None => println!("Unknown command; type ? for help"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.on_visibility_change(true);
    Ok(())
}

async fn reading_finished<E: SpeechEngine>(engine: Option<&E>) -> SpeechOutcome {
    match engine {
        Some(engine) => engine.finished().await,
        None => std::future::pending().await,
    }
}

pub async fn apply_command<S, E, W>(
    session: &mut DailyQuoteSession<S, E, TerminalView<W>>,
    command: InteractiveCommand,
    system_prefers_dark: bool,
) where
    S: PreferenceStore,
    E: SpeechEngine,
    W: Write,
{
    match command {
        InteractiveCommand::Shortcut(shortcut) => {
            if shortcut == Shortcut::ReadAgain && session.is_muted() {
                println!("Auto-read is muted; press m to unmute");
            }
            session.handle_shortcut(shortcut).await;
        }
        InteractiveCommand::ToggleTheme => {
            let next = Theme::from_dark(!session.theme().is_dark());
            session.set_theme(next).await;
        }
        InteractiveCommand::Theme(Some(theme)) => session.set_theme(theme).await,
        InteractiveCommand::Theme(None) => session.follow_system_theme(system_prefers_dark).await,
        InteractiveCommand::Voice(value) => {
            session.select_voice(&value).await;
            session.view_mut().pick_voice(&value);
        }
        InteractiveCommand::Voices => {
            let items = voice_list(session.voices(), Some(session.view().selected_voice()));
            for line in format_voice_lines(&items) {
                println!("{line}");
            }
        }
        InteractiveCommand::Hide => session.on_visibility_change(true),
        InteractiveCommand::Status => println!("{}", session.view().status_line()),
        InteractiveCommand::Help => println!("{HELP}"),
        InteractiveCommand::Quit => {}
    }
}
