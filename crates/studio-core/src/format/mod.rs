//! Display formatting shared by every screen: money, dates, durations.

use chrono::{DateTime, NaiveDate};

/// Format integer cents as a currency amount.
///
/// USD, EUR and GBP use their symbol (`$1,234.56`); any other code is written
/// as a prefix (`CAD 1,234.56`). `None` means USD. Negative amounts carry a
/// leading minus (`-$12.00`).
pub fn format_money(cents: i64, currency: Option<&str>) -> String {
    let code = currency.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("USD");
    let prefix = match code.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{other} "),
    };
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{sign}{prefix}{}.{:02}",
        group_thousands(abs / 100),
        abs % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Jan 5, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an ISO-8601 date or timestamp string; `None` if it does not parse.
pub fn format_iso_date(value: &str) -> Option<String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|ts| ts.date_naive())
        })
        .map(format_date)
}

/// Relative due label for invoices and tasks.
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "Due today".to_string(),
        1 => "Due in 1 day".to_string(),
        -1 => "Overdue by 1 day".to_string(),
        d if d > 0 => format!("Due in {d} days"),
        d => format!("Overdue by {} days", -d),
    }
}

/// Time-entry duration: `125` minutes becomes `2h 05m`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn money_groups_thousands_and_signs() {
        assert_eq!(format_money(123_456, None), "$1,234.56");
        assert_eq!(format_money(-1_200, Some("usd")), "-$12.00");
        assert_eq!(format_money(5, None), "$0.05");
        assert_eq!(format_money(100_000_000, Some("EUR")), "€1,000,000.00");
        assert_eq!(format_money(99_900, Some("GBP")), "£999.00");
        assert_eq!(format_money(123_456, Some("CAD")), "CAD 1,234.56");
        assert_eq!(format_money(i64::MIN, None), "-$92,233,720,368,547,758.08");
    }

    #[test]
    fn dates_render_short_month() {
        assert_eq!(format_date(date(2025, 1, 5)), "Jan 5, 2025");
        assert_eq!(format_iso_date("2025-12-31").as_deref(), Some("Dec 31, 2025"));
        assert_eq!(
            format_iso_date("2025-03-04T23:10:00Z").as_deref(),
            Some("Mar 4, 2025")
        );
        assert_eq!(format_iso_date("not a date"), None);
    }

    #[test]
    fn due_labels_cover_past_present_future() {
        let today = date(2025, 3, 10);
        assert_eq!(due_label(today, today), "Due today");
        assert_eq!(due_label(date(2025, 3, 13), today), "Due in 3 days");
        assert_eq!(due_label(date(2025, 3, 11), today), "Due in 1 day");
        assert_eq!(due_label(date(2025, 3, 8), today), "Overdue by 2 days");
        assert_eq!(due_label(date(2025, 3, 9), today), "Overdue by 1 day");
    }

    #[test]
    fn minutes_render_hours_and_padded_minutes() {
        assert_eq!(format_minutes(125), "2h 05m");
        assert_eq!(format_minutes(45), "0h 45m");
        assert_eq!(format_minutes(600), "10h 00m");
    }
}
