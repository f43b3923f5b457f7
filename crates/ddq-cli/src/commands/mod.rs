pub mod cache;
pub mod common;
pub mod completions;
pub mod interactive;
pub mod mute;
pub mod notify;
pub mod prefs;
pub mod read;
pub mod theme;
pub mod today;
pub mod voice;
