//! Display formatting
//!
//! Prices are shown in ringgit, and an absent price renders as `-` so it is
//! never confused with zero. Dates use Malay month names for display and
//! `DD/MM/YYYY` for the spreadsheet sink.

use chrono::{Datelike, NaiveDate};

/// Placeholder for an unspecified value
pub const ABSENT: &str = "-";

const MONTHS_MS: [&str; 12] = [
    "Januari", "Februari", "Mac", "April", "Mei", "Jun", "Julai", "Ogos", "September", "Oktober",
    "November", "Disember",
];

/// Format an optional price, e.g. `RM 2.50`
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("RM {:.2}", value),
        None => ABSENT.to_string(),
    }
}

/// Long display form, e.g. `5 Oktober 2026`
pub fn format_display_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_MS[date.month0() as usize],
        date.year()
    )
}

/// Date as the spreadsheet expects it, e.g. `05/10/2026`
pub fn format_sink_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
