//! Display formatting helpers.

use chrono::{DateTime, Local, Utc};

/// Format an INR amount with Indian digit grouping, e.g. `₹1,23,456.50`.
///
/// Negative values are prefixed with `-`; amounts are shown with two decimal
/// places to match how the platform denominates wallets.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let rupees = amount.trunc() as u64;
    let paise = ((amount.fract() * 100.0).round() as u64).min(99);
    let grouped = group_indian(rupees);
    let sign = if negative { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, grouped, paise)
}

/// Indian grouping: last three digits, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut i = head_bytes.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(&head[start..i]);
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Render a server timestamp in the admin's local time zone,
/// e.g. `14 Mar 2025, 15:52`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d %b %Y, %H:%M").to_string()
}

/// Shorten a message for toast display.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_inr_small_amounts() {
        assert_eq!(format_inr(0.0), "₹0.00");
        assert_eq!(format_inr(5.0), "₹5.00");
        assert_eq!(format_inr(999.0), "₹999.00");
    }

    #[test]
    fn test_format_inr_indian_grouping() {
        assert_eq!(format_inr(1000.0), "₹1,000.00");
        assert_eq!(format_inr(123456.0), "₹1,23,456.00");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678.00");
        assert_eq!(format_inr(100000.0), "₹1,00,000.00");
    }

    #[test]
    fn test_format_inr_paise() {
        assert_eq!(format_inr(1520.5), "₹1,520.50");
        assert_eq!(format_inr(0.05), "₹0.05");
    }

    #[test]
    fn test_format_inr_negative() {
        assert_eq!(format_inr(-250.0), "-₹250.00");
    }

    #[test]
    fn test_format_timestamp_is_stable_shape() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 10, 22, 5).unwrap();
        let rendered = format_timestamp(ts);
        // Local offset varies by machine; the shape does not.
        assert!(rendered.contains("2025"));
        assert!(rendered.contains("Mar"));
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }
}
