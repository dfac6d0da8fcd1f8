// libs/scheduling-cell/src/services/datetime.rs
use chrono::NaiveDateTime;

/// The single textual form every stored and compared date-time uses.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input patterns, tried in priority order. The order matters:
/// some patterns are ambiguous prefixes of others, so the first pattern
/// that parses the whole input wins.
const SUPPORTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",    // 2025-10-10 16:00:00
    "%Y-%m-%d %I:%M:%S %p", // 2025-10-10 4:00:00 PM
    "%Y-%m-%d %I:%M %p",    // 2025-10-10 4:00 PM
    "%d/%m/%Y %H:%M:%S",    // 10/10/2025 16:00:00
    "%d-%m-%Y %H:%M:%S",    // 10-10-2025 16:00:00
    "%d/%m/%Y %I:%M:%S %p", // 10/10/2025 4:00:00 PM
    "%d-%m-%Y %I:%M:%S %p", // 10-10-2025 4:00:00 PM
    "%d/%m/%Y %I:%M %p",    // 10/10/2025 4:00 PM
    "%d-%m-%Y %I:%M %p",    // 10-10-2025 4:00 PM
    "%B %d, %Y %I:%M %p",   // October 10, 2025 4:00 PM
    "%d %B %Y %I:%M %p",    // 10 October 2025 4:00 PM
    "%Y-%m-%dT%H:%M",       // 2025-10-10T16:00
    "%Y-%m-%dT%I:%M%p",     // 2025-10-10T4:00PM
];

/// Parse a date-time string in any supported format. `None` is the
/// "not recognized" sentinel consumed by callers; parsing never panics.
pub fn normalize(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    SUPPORTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

pub fn canonical(value: NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// Normalize straight to the canonical `YYYY-MM-DD HH:MM:SS` string.
pub fn normalize_to_canonical(input: &str) -> Option<String> {
    normalize(input).map(canonical)
}

#[cfg(test)]
mod tests {
    use super::{normalize, normalize_to_canonical};

    #[test]
    fn canonical_input_is_unchanged() {
        assert_eq!(
            normalize_to_canonical("2025-10-10 16:00:00").as_deref(),
            Some("2025-10-10 16:00:00")
        );
    }

    #[test]
    fn twelve_hour_clock_converts_to_twenty_four() {
        assert_eq!(
            normalize_to_canonical("10/10/2025 4:00 PM").as_deref(),
            Some("2025-10-10 16:00:00")
        );
        assert_eq!(
            normalize_to_canonical("2025-10-10 4:00 PM").as_deref(),
            Some("2025-10-10 16:00:00")
        );
    }

    #[test]
    fn month_name_variants_parse() {
        assert_eq!(
            normalize_to_canonical("October 10, 2025 4:00 PM").as_deref(),
            Some("2025-10-10 16:00:00")
        );
        assert_eq!(
            normalize_to_canonical("10 October 2025 4:00 PM").as_deref(),
            Some("2025-10-10 16:00:00")
        );
    }

    #[test]
    fn compact_iso_variants_fill_in_seconds() {
        assert_eq!(
            normalize_to_canonical("2025-10-10T16:00").as_deref(),
            Some("2025-10-10 16:00:00")
        );
        assert_eq!(
            normalize_to_canonical("2025-10-10T4:00PM").as_deref(),
            Some("2025-10-10 16:00:00")
        );
    }

    #[test]
    fn day_month_year_order_is_respected() {
        // 5 March, not May 3
        assert_eq!(
            normalize_to_canonical("05/03/2025 10:00:00").as_deref(),
            Some("2025-03-05 10:00:00")
        );
    }

    #[test]
    fn unrecognized_input_is_rejected() {
        assert_eq!(normalize("not a date"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("2025-10-10"), None);
        assert_eq!(normalize("2025-10-10 16:00:00 extra"), None);
    }
}
