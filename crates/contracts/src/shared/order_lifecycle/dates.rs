//! Order dates as written by the store.
//!
//! The store keeps dates as display strings, usually the browser locale form
//! with an `at` between date and time (`"12/5/2024 at 10:30:15 AM"`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::a001_order::Order;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%A, %B %d, %Y %I:%M:%S %p",
    "%A, %B %d, %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

/// Offset-carrying forms, `Date.prototype.toString()` among them
const ZONED_FORMATS: &[&str] = &["%a %b %d %Y %H:%M:%S GMT%z", "%a %b %d %Y %H:%M:%S %z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%A, %B %d, %Y", "%d %B %Y"];

/// Drop the `at` separator and collapse whitespace
///
/// `"2024-01-05 at 10:00"` -> `"2024-01-05 10:00"`
pub fn normalize_date(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|token| *token != "at")
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"... GMT+0530 (India Standard Time)"` -> `"... GMT+0530"`
fn strip_zone_name(date: &str) -> &str {
    match date.rfind(" (") {
        Some(pos) if date.ends_with(')') => date[..pos].trim_end(),
        _ => date,
    }
}

/// Parse an order date; `None` when no known format matches.
/// Date-only values resolve to midnight.
pub fn try_parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = normalize_date(raw);
    if normalized.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_utc());
    }

    let unzoned = strip_zone_name(&normalized);
    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(unzoned, format).ok())
    {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse an order date; unparsable input becomes `NaiveDateTime::MIN` so the
/// record sorts after every dated one.
pub fn parse_order_date(raw: &str) -> NaiveDateTime {
    try_parse_order_date(raw).unwrap_or(NaiveDateTime::MIN)
}

/// New vector ordered by date, most recent first. Equal dates keep their
/// input order.
pub fn sort_by_date_desc_with<T, F>(items: &[T], date_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let mut keyed: Vec<(NaiveDateTime, T)> = items
        .iter()
        .map(|item| (parse_order_date(date_of(item)), item.clone()))
        .collect();
    // sort_by is stable
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

pub fn sort_by_date_desc(orders: &[Order]) -> Vec<Order> {
    sort_by_date_desc_with(orders, |order| order.date.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn dated(id: &str, date: &str) -> Order {
        Order {
            id: id.to_string(),
            date: date.to_string(),
            ..Order::default()
        }
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-01-05 at 10:00"), "2024-01-05 10:00");
        assert_eq!(normalize_date("  2024-01-05  "), "2024-01-05");
        assert_eq!(normalize_date("December 5, 2024 at 10:30 AM"), "December 5, 2024 10:30 AM");
    }

    #[test]
    fn test_at_form_and_plain_date_share_calendar_day() {
        let with_time = parse_order_date("2024-01-05 at 10:00");
        let plain = parse_order_date("2024-01-05");

        assert_eq!(with_time.date(), plain.date());
        assert_eq!(plain.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(with_time.format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn test_browser_locale_forms() {
        let us = parse_order_date("12/5/2024 at 10:30:15 PM");
        assert_eq!((us.year(), us.month(), us.day()), (2024, 12, 5));
        assert_eq!(us.format("%H:%M:%S").to_string(), "22:30:15");

        let long = parse_order_date("December 5, 2024 at 10:30 AM");
        assert_eq!(long.format("%Y-%m-%d %H:%M").to_string(), "2024-12-05 10:30");

        let iso = parse_order_date("2024-12-05T04:00:00Z");
        assert_eq!(iso.format("%Y-%m-%d %H:%M").to_string(), "2024-12-05 04:00");
    }

    #[test]
    fn test_javascript_date_string() {
        let js = parse_order_date("Thu Dec 05 2024 10:30:15 GMT+0530 (India Standard Time)");
        assert_eq!(js.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-12-05 05:00:15");

        let bare = parse_order_date("Thu Dec 05 2024 10:30:15 GMT+0530");
        assert_eq!(bare, js);
    }

    #[test]
    fn test_unparsable_date_is_minimum() {
        assert_eq!(parse_order_date("yesterday-ish"), NaiveDateTime::MIN);
        assert_eq!(parse_order_date(""), NaiveDateTime::MIN);
        assert_eq!(try_parse_order_date("not a date"), None);
    }

    #[test]
    fn test_sort_newest_first_with_malformed_last() {
        let input = vec![
            dated("old", "2023-06-01"),
            dated("bad", "??"),
            dated("new", "2024-03-10 at 09:15"),
            dated("mid", "1/20/2024 at 6:00:00 PM"),
            dated("js", "Sat Feb 10 2024 12:00:00 GMT+0000 (Coordinated Universal Time)"),
        ];
        let sorted = sort_by_date_desc(&input);
        assert_eq!(ids(&sorted), vec!["new", "js", "mid", "old", "bad"]);
    }

    #[test]
    fn test_sort_same_day_and_ties_keep_input_order() {
        let input = vec![
            dated("plain", "2024-01-05"),
            dated("timed", "2024-01-05 at 10:00"),
            dated("tie-a", "2024-01-04"),
            dated("tie-b", "2024-01-04"),
            dated("bad-1", "x"),
            dated("bad-2", "y"),
        ];
        let sorted = sort_by_date_desc(&input);
        assert_eq!(
            ids(&sorted),
            vec!["timed", "plain", "tie-a", "tie-b", "bad-1", "bad-2"]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let input = vec![
            dated("a", "2024-01-05"),
            dated("b", "garbage"),
            dated("c", "2024-01-05"),
            dated("d", "2025-02-01 at 08:00"),
        ];
        let once = sort_by_date_desc(&input);
        let twice = sort_by_date_desc(&once);
        assert_eq!(once, twice);
        assert_eq!(input.len(), once.len());
    }

    #[test]
    fn test_generic_sort_by_accessor() {
        let rows = vec![("x", "2024-01-01"), ("y", "2024-02-01")];
        let sorted = sort_by_date_desc_with(&rows, |row| row.1);
        assert_eq!(sorted[0].0, "y");
    }
}
