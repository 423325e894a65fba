//! Date helper functions

use chrono::{DateTime, NaiveDate};

/// Parse an index date (`YYYY-MM-DD`, or RFC 3339 with a time part)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

/// Format an index date for display using a Moment.js-style format
///
/// Unparseable dates are shown as written.
///
/// # Examples
/// ```ignore
/// format_display_date("2024-01-05", "MMM D, YYYY") // -> "Jan 5, 2024"
/// ```
pub fn format_display_date(raw: &str, format: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format(&moment_to_chrono_format(format)).to_string(),
        None => {
            tracing::debug!("Unparseable post date {:?}", raw);
            raw.to_string()
        }
    }
}

/// Machine-readable form for `<time datetime>`
pub fn date_xml(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-01-05", "MMM D, YYYY"), "Jan 5, 2024");
        assert_eq!(format_display_date("2024-02-01", "YYYY-MM-DD"), "2024-02-01");
        assert_eq!(
            format_display_date("2024-02-01T10:00:00Z", "MMMM D, YYYY"),
            "February 1, 2024"
        );
    }

    #[test]
    fn test_unparseable_date_shown_as_is() {
        assert_eq!(format_display_date("someday", "MMM D, YYYY"), "someday");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("MMM D, YYYY"), "%b %-d, %Y");
        assert_eq!(moment_to_chrono_format("dddd"), "%A");
    }
}
