//! US dollar formatting for amounts held in cents.

/// Render an amount in cents the way an en-US locale prints US dollars.
///
/// Thousands are grouped with commas and exactly two fraction digits are
/// always shown. Negative amounts carry a leading minus sign.
///
/// # Examples
/// ```
/// use invoice_dashboard::domain::format_currency;
///
/// assert_eq!(format_currency(123_456), "$1,234.56");
/// assert_eq!(format_currency(5), "$0.05");
/// assert_eq!(format_currency(-1_000), "-$10.00");
/// ```
#[must_use]
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let dollars = (magnitude / 100).to_string();
    let remainder = magnitude % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{remainder:02}")
}
