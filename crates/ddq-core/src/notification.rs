//! Push notification payloads and click handling

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::Quote;

/// Action that opens the quote page
pub const READ_ACTION: &str = "explore";
/// Action that only dismisses the notification
pub const CLOSE_ACTION: &str = "close";

const NOTIFICATION_ICON: &str = "/icon-192x192.png";
const NOTIFICATION_BADGE: &str = "/icon-96x96.png";
const VIBRATE_PATTERN: [u32; 3] = [100, 50, 100];
const HOME_URL: &str = "/";

/// Incoming push payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub primary_key: Value,
}

/// A button shown on the notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

/// Data carried with the notification for the click handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Unix ms at which the push arrived
    pub date_of_arrival: i64,
    pub primary_key: Value,
}

/// Display options handed to the notification host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
}

/// A notification ready to be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub options: NotificationOptions,
}

/// Result of clicking a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationClick {
    /// Notification closed and a window opened at the URL
    OpenWindow(String),
    /// Notification closed, nothing else
    Closed,
}

impl NotificationPayload {
    /// Parse a JSON push payload
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Payload announcing a day's quote
    #[must_use]
    pub fn for_quote(quote: &Quote, primary_key: Value) -> Self {
        Self {
            title: "Daily Design Quote".to_string(),
            body: quote.to_string(),
            primary_key,
        }
    }

    /// Build the notification shown for this payload
    #[must_use]
    pub fn into_notification(self, arrived_at_ms: i64) -> Notification {
        let action = |action: &str, title: &str| NotificationAction {
            action: action.to_string(),
            title: title.to_string(),
            icon: NOTIFICATION_ICON.to_string(),
        };

        Notification {
            title: self.title,
            options: NotificationOptions {
                body: self.body,
                icon: NOTIFICATION_ICON.to_string(),
                badge: NOTIFICATION_BADGE.to_string(),
                vibrate: VIBRATE_PATTERN.to_vec(),
                data: NotificationData {
                    date_of_arrival: arrived_at_ms,
                    primary_key: self.primary_key,
                },
                actions: vec![
                    action(READ_ACTION, "Read Quote"),
                    action(CLOSE_ACTION, "Close"),
                ],
            },
        }
    }
}

/// Handle a click on a notification or one of its actions
#[must_use]
pub fn handle_click(action: Option<&str>) -> NotificationClick {
    if action == Some(READ_ACTION) {
        tracing::debug!("Notification read action, opening {}", HOME_URL);
        NotificationClick::OpenWindow(HOME_URL.to_string())
    } else {
        NotificationClick::Closed
    }
}
