//! ddq-core - Core library for Daily Design Quote
//!
//! This crate contains the quote list, date-based selection, preference
//! storage, speech and offline cache logic shared by the `ddq` CLI.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod notification;
pub mod quotes;
pub mod selector;
pub mod session;
pub mod speech;
pub mod state;
pub mod theme;
pub mod util;

pub use error::{Error, Result};
pub use models::{Quote, QuoteBook};
