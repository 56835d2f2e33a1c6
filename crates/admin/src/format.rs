//! Display formatting helpers shared by tables, infolists, and widgets.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format a date the way the panel displays it (`d/m/Y`).
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a money amount with two decimal places and thousands separators.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Convert a `snake_case` value into a headline ("credit_card" -> "Credit Card").
#[must_use]
pub fn headline(value: &str) -> String {
    value
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Humanize the distance between two instants ("3 days ago").
///
/// Used by the created/modified placeholders in the edit form side panel.
#[must_use]
pub fn human_time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 0 {
        // Clock skew between app servers reads as fresh.
        return "just now".to_string();
    }

    let (amount, unit) = if seconds < 60 {
        return "just now".to_string();
    } else if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else if seconds < 2_592_000 {
        (seconds / 86_400, "day")
    } else if seconds < 31_536_000 {
        (seconds / 2_592_000, "month")
    } else {
        (seconds / 31_536_000, "year")
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Round an average to two decimal places for stat display.
#[must_use]
pub fn format_average(value: Decimal) -> String {
    value.to_f64().map_or_else(
        || value.round_dp(2).to_string(),
        |v| format!("{v:.2}"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_brazilian_order() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(format_date(date), "31/01/2024");
    }

    #[test]
    fn test_format_money_grouping() {
        assert_eq!(format_money("1234567.5".parse().unwrap()), "1,234,567.50");
        assert_eq!(format_money("999.99".parse().unwrap()), "999.99");
        assert_eq!(format_money("0".parse().unwrap()), "0.00");
        assert_eq!(format_money("-1500".parse().unwrap()), "-1,500.00");
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline("credit_card"), "Credit Card");
        assert_eq!(headline("bank_transfer"), "Bank Transfer");
        assert_eq!(headline("paypal"), "Paypal");
        assert_eq!(headline(""), "");
    }

    #[test]
    fn test_human_time_since() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let t = Utc.with_ymd_and_hms(2024, 6, 15, 11, 59, 30).unwrap();
        assert_eq!(human_time_since(t, now), "just now");

        let t = Utc.with_ymd_and_hms(2024, 6, 15, 11, 30, 0).unwrap();
        assert_eq!(human_time_since(t, now), "30 minutes ago");

        let t = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(human_time_since(t, now), "1 day ago");

        let t = Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(human_time_since(t, now), "1 year ago");

        // then after now (skew) degrades gracefully
        let t = Utc.with_ymd_and_hms(2024, 6, 15, 12, 5, 0).unwrap();
        assert_eq!(human_time_since(t, now), "just now");
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average("10.666".parse().unwrap()), "10.67");
        assert_eq!(format_average("3".parse().unwrap()), "3.00");
    }
}
