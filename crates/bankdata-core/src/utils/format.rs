use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Debits are shifted right by this pad so they stand apart from credits
const DEBIT_PAD: &str = "    ";

/// Format a money amount with exactly two decimals.
/// Negative amounts get a leading pad that positive ones don't.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}{}", DEBIT_PAD, rounded)
    } else {
        rounded.abs().to_string()
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// Format a booking date as YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
