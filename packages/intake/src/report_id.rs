//! Report identifier generation.
//!
//! Format: `KLA-<4-digit-year>-ACC-<3-digit-zero-padded-1..=999>`. The
//! suffix is random and the format itself does not guarantee uniqueness;
//! callers that care (the application context does) retry against their
//! store until the candidate is unused.

use chrono::Datelike as _;
use rand::Rng;

/// Generates a candidate report ID for the given year.
#[must_use]
pub fn generate_report_id(year: i32, rng: &mut impl Rng) -> String {
    let sequence: u16 = rng.gen_range(1..=999);
    format!("KLA-{year}-ACC-{sequence:03}")
}

/// The current UTC year, as used for generated report IDs.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Whether a string is a well-formed report ID.
#[must_use]
pub fn is_well_formed(report_id: &str) -> bool {
    let mut parts = report_id.split('-');
    let (Some(prefix), Some(year), Some(tag), Some(sequence), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    prefix == "KLA"
        && tag == "ACC"
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && sequence.len() == 3
        && sequence.chars().all(|c| c.is_ascii_digit())
        && sequence.parse::<u16>().is_ok_and(|n| (1..=999).contains(&n))
}
