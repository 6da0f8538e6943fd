//! Input normalization shared by every wizard flow.
//!
//! DESIGN
//! ======
//! The document-number field must only ever hold a digit string, so the
//! same filter runs on every keystroke AND again on submit — pasted text
//! with separators ("1.234.567") degrades to the digits instead of failing
//! validation. Free text for the special certificate is trimmed and gets
//! its first character uppercased before preview and transmission.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Document-number length window enforced by the backend for admin lookups.
pub const DOC_NUMBER_MIN_LEN: usize = 5;
pub const DOC_NUMBER_MAX_LEN: usize = 20;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Strip every non-decimal-digit character.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether a digits-only number falls inside the backend's accepted window.
#[must_use]
pub fn doc_number_length_ok(numero: &str) -> bool {
    (DOC_NUMBER_MIN_LEN..=DOC_NUMBER_MAX_LEN).contains(&numero.len())
}

/// Trim and capitalize the first character of user-authored free text.
///
/// Returns an empty string for whitespace-only input; callers treat that as
/// a validation failure.
#[must_use]
pub fn capitalize_first(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Strict `YYYY-MM-DD` check for the birthdate field.
///
/// The backend compares the raw string against the stored date, so this is
/// only a client-side guard against malformed input reaching the network.
#[must_use]
pub fn is_iso_date(raw: &str) -> bool {
    Date::parse(raw, ISO_DATE).is_ok()
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
