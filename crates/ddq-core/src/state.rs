//! Shared session state types.

/// Lifecycle of the quote page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PageState {
    /// Initialization has not finished
    #[default]
    Loading,
    /// Quote displayed
    Ready,
    /// Initialization failed; static error shown
    Error,
}

/// Keyboard shortcuts understood by the quote page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Space outside of form controls
    ReadAgain,
    /// Ctrl+M
    ToggleMute,
}

impl Shortcut {
    /// Map a key press to a shortcut. `on_page_body` is false when focus is
    /// inside a control, where Space keeps its usual meaning.
    #[must_use]
    pub fn from_key(key: &str, ctrl: bool, on_page_body: bool) -> Option<Self> {
        match key {
            " " if on_page_body => Some(Self::ReadAgain),
            "m" if ctrl => Some(Self::ToggleMute),
            _ => None,
        }
    }
}
