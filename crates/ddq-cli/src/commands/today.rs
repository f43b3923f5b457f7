use chrono::NaiveDate;
use ddq_core::export::{render_json, render_markdown, ExportFormat, QuoteOfTheDay};
use ddq_core::selector::today;
use ddq_core::session::DailyQuoteSession;
use ddq_core::QuoteBook;

use crate::commands::common::{finish_reading, Context, Storage};
use crate::error::CliError;
use crate::terminal::TerminalView;

pub fn render_quote_of_the_day(date: NaiveDate, format: ExportFormat) -> Result<String, CliError> {
    let entry = QuoteOfTheDay::for_date(&QuoteBook::builtin(), date);
    Ok(match format {
        ExportFormat::Json => render_json(&entry)?,
        ExportFormat::Markdown => render_markdown(&entry),
    })
}

pub async fn run_today(
    ctx: &Context,
    date: Option<NaiveDate>,
    format: Option<ExportFormat>,
    speak: bool,
) -> Result<(), CliError> {
    let date = date.unwrap_or_else(today);

    if let Some(format) = format {
        println!("{}", render_quote_of_the_day(date, format)?);
        return Ok(());
    }

    let storage = Storage::open(&ctx.db_path).await;
    let mut session = DailyQuoteSession::new(
        storage.preferences(),
        ctx.speech_engine(),
        TerminalView::stdout(false),
        QuoteBook::builtin(),
    );

    if speak {
        session.start(date, ctx.system_prefers_dark()).await?;
        finish_reading(&mut session).await;
    } else {
        session.initialize(date, ctx.system_prefers_dark()).await?;
    }

    Ok(())
}
