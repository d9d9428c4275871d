//! Elapsed time formatting.

/// Format milliseconds as `MM:SS.CC` (hundredths, floored).
///
/// Minutes are not wrapped into hours, so long runs widen the minutes field.
#[must_use]
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1_000) % 60;
    let centis = (ms % 1_000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Format a non-negative offset as `+MM:SS.CC`.
#[must_use]
pub fn format_offset(ms: u64) -> String {
    format!("+{}", format_elapsed(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_elapsed(0), "00:00.00");
    }

    #[test]
    fn test_format_minutes_seconds_hundredths() {
        assert_eq!(format_elapsed(61_234), "01:01.23");
        assert_eq!(format_elapsed(59_999), "00:59.99");
        assert_eq!(format_elapsed(9), "00:00.00");
    }

    #[test]
    fn test_format_long_run_not_wrapped() {
        // 125 minutes, 5 seconds, 60 milliseconds
        assert_eq!(format_elapsed(125 * 60_000 + 5_060), "125:05.06");
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(1_200), "+00:01.20");
    }
}
