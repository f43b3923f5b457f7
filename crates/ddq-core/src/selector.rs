//! Daily quote selection.
//!
//! Each calendar date maps to one quote: the date's day of year (January 1 is
//! day 1) modulo the list length. Because years have 365 or 366 days, the
//! quote shown on a given date drifts from one year to the next.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Quote, QuoteBook};

/// Whole days elapsed since December 31 of the previous year
#[must_use]
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Position of the quote shown on `date` in a list of `len` quotes
pub fn quote_index(date: NaiveDate, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(Error::InvalidInput(
            "cannot select a quote from an empty list".to_string(),
        ));
    }
    Ok(day_of_year(date) as usize % len)
}

/// Select the quote for `date`
pub fn select_quote(date: NaiveDate, quotes: &[Quote]) -> Result<&Quote> {
    let index = quote_index(date, quotes.len())?;
    Ok(&quotes[index])
}

/// Current calendar date in the local timezone
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl QuoteBook {
    /// Quote shown on `date`
    #[must_use]
    pub fn for_date(&self, date: NaiveDate) -> &Quote {
        let index = day_of_year(date) as usize % self.len();
        &self.as_slice()[index]
    }

    /// Position of the quote shown on `date`
    #[must_use]
    pub fn index_for_date(&self, date: NaiveDate) -> usize {
        day_of_year(date) as usize % self.len()
    }

    /// Quote shown today in the local timezone
    #[must_use]
    pub fn todays_quote(&self) -> &Quote {
        self.for_date(today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_quotes(count: usize) -> Vec<Quote> {
        (0..count)
            .map(|i| Quote::new(format!("quote {i}"), format!("author {i}")))
            .collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_january_first_is_day_one() {
        assert_eq!(day_of_year(date(2026, 1, 1)), 1);
        assert_eq!(day_of_year(date(2026, 12, 31)), 365);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
    }

    #[test]
    fn test_day_one_with_52_quotes_selects_index_one() {
        let quotes = numbered_quotes(52);
        let selected = select_quote(date(2026, 1, 1), &quotes).unwrap();
        assert_eq!(selected, &quotes[1]);
    }

    #[test]
    fn test_empty_list_is_invalid_input() {
        let result = select_quote(date(2026, 3, 14), &[]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_same_day_of_year_selects_same_quote() {
        let quotes = numbered_quotes(7);
        // Both are day 59 of a non-leap year
        let a = select_quote(date(2025, 2, 28), &quotes).unwrap();
        let b = select_quote(date(2027, 2, 28), &quotes).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_index_always_in_range() {
        for len in 1..=60 {
            let mut day = date(2024, 1, 1);
            while day.year() == 2024 {
                let index = quote_index(day, len).unwrap();
                assert!(index < len, "index {index} out of range for len {len}");
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_single_quote_always_selected() {
        let quotes = numbered_quotes(1);
        assert_eq!(select_quote(date(2026, 10, 17), &quotes).unwrap(), &quotes[0]);
    }

    #[test]
    fn test_quote_book_matches_free_function() {
        let book = QuoteBook::builtin();
        let day = date(2026, 10, 17);
        assert_eq!(book.for_date(day), select_quote(day, book.as_slice()).unwrap());
        // Day 290 of 2026, 290 % 51 = 35
        assert_eq!(book.index_for_date(day), 35);
    }
}
