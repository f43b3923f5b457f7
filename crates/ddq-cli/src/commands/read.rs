use ddq_core::selector::today;
use ddq_core::session::DailyQuoteSession;
use ddq_core::speech::SpeechOutcome;
use ddq_core::QuoteBook;

use crate::commands::common::{describe_outcome, finish_reading, Context, Storage};
use crate::error::CliError;
use crate::terminal::TerminalView;

pub async fn run_read(ctx: &Context) -> Result<(), CliError> {
    let engine = ctx.require_speech_engine()?;
    let storage = Storage::open(&ctx.db_path).await;
    let mut session = DailyQuoteSession::new(
        storage.preferences(),
        Some(engine),
        TerminalView::stdout(false),
        QuoteBook::builtin(),
    );
    session.initialize(today(), ctx.system_prefers_dark()).await?;

    // Muting blocks every reading, not only the automatic one
    if session.is_muted() {
        println!("Auto-read is muted. Run `ddq mute` to unmute.");
        return Ok(());
    }

    if !session.speak().await {
        return Err(CliError::SpeechUnavailable(
            "the speech command could not be started".to_string(),
        ));
    }

    if let Some(outcome) = finish_reading(&mut session).await {
        tracing::debug!("Reading {}", describe_outcome(&outcome));
        if let SpeechOutcome::Failed(error) = outcome {
            return Err(CliError::SpeechUnavailable(error));
        }
    }
    Ok(())
}
