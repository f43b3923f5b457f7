//! Quote model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A single quote and its attribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body
    pub text: String,
    /// Attributed author
    pub author: String,
}

impl Quote {
    /// Create a new quote
    #[must_use]
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Text handed to the speech engine: body followed by the author
    #[must_use]
    pub fn spoken_text(&self) -> String {
        format!("{} — {}", self.text, self.author)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{201c}{}\u{201d} — {}", self.text, self.author)
    }
}

/// An ordered, non-empty list of quotes.
///
/// Order is significant: daily selection is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
}

impl QuoteBook {
    /// Build a quote book, rejecting an empty list
    pub fn new(quotes: Vec<Quote>) -> Result<Self> {
        if quotes.is_empty() {
            return Err(Error::InvalidInput(
                "quote list must contain at least one quote".to_string(),
            ));
        }
        Ok(Self { quotes })
    }

    /// The built-in design quote list
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            quotes: crate::quotes::DESIGN_QUOTES
                .iter()
                .map(|(text, author)| Quote::new(*text, *author))
                .collect(),
        }
    }

    /// Number of quotes (always at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the book has no quotes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote at a position, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// All quotes in order
    #[must_use]
    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::builtin()
    }
}
