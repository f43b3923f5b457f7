use chrono::NaiveDate;
use ddq_core::notification::{handle_click, Notification, NotificationClick, NotificationPayload};
use ddq_core::selector::{day_of_year, today};
use ddq_core::util::unix_timestamp_millis_now;
use ddq_core::QuoteBook;
use serde_json::json;

use crate::error::CliError;

/// Notification for a JSON payload, or for the quote of `date` when absent
pub fn build_notification(
    payload: Option<&str>,
    date: NaiveDate,
    arrived_at_ms: i64,
) -> Result<Notification, CliError> {
    let payload = match payload {
        Some(json) => NotificationPayload::parse(json)?,
        None => {
            let book = QuoteBook::builtin();
            NotificationPayload::for_quote(book.for_date(date), json!(day_of_year(date)))
        }
    };
    Ok(payload.into_notification(arrived_at_ms))
}

pub fn run_notify(payload: Option<&str>, click: Option<&str>) -> Result<(), CliError> {
    let notification = build_notification(payload, today(), unix_timestamp_millis_now())?;
    println!("{}", serde_json::to_string_pretty(&notification)?);

    if let Some(action) = click {
        let action = Some(action.trim()).filter(|action| !action.is_empty());
        match handle_click(action) {
            NotificationClick::OpenWindow(url) => println!("Notification closed; opening {url}"),
            NotificationClick::Closed => println!("Notification closed"),
        }
    }
    Ok(())
}
