//! Quotation code scheme: `FOR-EKA-PRO-3_{year}-{seq}`
//!
//! The server suggests the next code optimistically from the last stored
//! one; the unique column on the quotation table is what actually guards
//! against duplicates.

/// Scheme prefix shared by every generated code.
pub const QUOTE_CODE_PREFIX: &str = "FOR-EKA-PRO-3_";

/// Parse a code into its `(year, sequence)` pair.
///
/// Expects the exact shape `FOR-EKA-PRO-3_YYYY-NNN`. Hand-entered codes
/// outside the scheme are allowed in storage, they just never participate
/// in sequence suggestion.
pub fn parse_quote_code(code: &str) -> Option<(i32, u32)> {
    let rest = code.strip_prefix(QUOTE_CODE_PREFIX)?;
    let (year, seq) = rest.split_once('-')?;

    if year.len() != 4 || seq.len() != 3 {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let seq: u32 = seq.parse().ok()?;
    Some((year, seq))
}

/// Format a code for a year and sequence number.
pub fn format_quote_code(year: i32, seq: u32) -> String {
    format!("{}{}-{:03}", QUOTE_CODE_PREFIX, year, seq)
}

/// Suggest the next code given the lexicographically last stored one.
///
/// "Last code + 1" within the current year; a code from a previous year
/// (or no code at all, or an unparseable one) restarts the sequence at 001.
pub fn next_quote_code(last_code: Option<&str>, year: i32) -> String {
    match last_code.and_then(parse_quote_code) {
        Some((last_year, last_seq)) if last_year == year => format_quote_code(year, last_seq + 1),
        _ => format_quote_code(year, 1),
    }
}

/// Whether a code matches the scheme (used for create-form validation).
pub fn is_valid_quote_code(code: &str) -> bool {
    parse_quote_code(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_code() {
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_2025-001"), Some((2025, 1)));
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_2026-137"), Some((2026, 137)));
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        assert_eq!(parse_quote_code(""), None);
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_2025"), None);
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_25-001"), None);
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_2025-1"), None);
        assert_eq!(parse_quote_code("FOR-EKA-PRO-3_2025-abc"), None);
        assert_eq!(parse_quote_code("COT-2025-001"), None);
    }

    #[test]
    fn next_code_increments_within_the_year() {
        assert_eq!(
            next_quote_code(Some("FOR-EKA-PRO-3_2025-007"), 2025),
            "FOR-EKA-PRO-3_2025-008"
        );
    }

    #[test]
    fn next_code_restarts_on_a_new_year() {
        assert_eq!(
            next_quote_code(Some("FOR-EKA-PRO-3_2025-142"), 2026),
            "FOR-EKA-PRO-3_2026-001"
        );
    }

    #[test]
    fn next_code_defaults_to_001() {
        assert_eq!(next_quote_code(None, 2025), "FOR-EKA-PRO-3_2025-001");
        assert_eq!(next_quote_code(Some("garbage"), 2025), "FOR-EKA-PRO-3_2025-001");
    }

    #[test]
    fn format_pads_the_sequence() {
        assert_eq!(format_quote_code(2025, 9), "FOR-EKA-PRO-3_2025-009");
        assert_eq!(format_quote_code(2025, 99), "FOR-EKA-PRO-3_2025-099");
        assert_eq!(format_quote_code(2025, 999), "FOR-EKA-PRO-3_2025-999");
    }

    #[test]
    fn round_trip() {
        let code = format_quote_code(2027, 42);
        assert!(is_valid_quote_code(&code));
        assert_eq!(parse_quote_code(&code), Some((2027, 42)));
    }
}
