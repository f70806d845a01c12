use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input {
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}

/// Every calendar day in `[from, to]`, ascending. Empty when `to < from`.
pub fn days_in_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}

/// `[today - days, today]`; errors when the start falls outside the calendar.
pub fn trailing_days(today: NaiveDate, days: u32) -> AppResult<Vec<NaiveDate>> {
    let from = today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| AppError::InvalidInput(format!("{} days before {} is out of range", days, today)))?;
    Ok(days_in_range(from, today))
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Resolve an optional `--from`/`--to` pair; the default is the current month up to `fallback_to`.
pub fn resolve_range(
    from: Option<&String>,
    to: Option<&String>,
    fallback_to: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let to = parse_optional_date(to)?.unwrap_or(fallback_to);
    let from = parse_optional_date(from)?.unwrap_or_else(|| first_day_of_month(to));

    if to < from {
        return Err(AppError::InvalidDate(format!(
            "range end {} is before range start {}",
            to, from
        )));
    }

    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn trailing_days_include_both_ends() {
        let days = trailing_days(d("2025-03-02"), 3).unwrap();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], d("2025-02-27"));
        assert_eq!(days[3], d("2025-03-02"));
    }

    #[test]
    fn trailing_days_before_calendar_start_is_an_error() {
        let res = trailing_days(NaiveDate::MIN, 1);
        assert!(matches!(res, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn range_defaults_to_current_month() {
        let (from, to) = resolve_range(None, None, d("2025-03-17")).unwrap();
        assert_eq!(from, d("2025-03-01"));
        assert_eq!(to, d("2025-03-17"));

        let bad = resolve_range(Some(&"2025-03-10".to_string()), Some(&"2025-03-01".to_string()), d("2025-03-17"));
        assert!(matches!(bad, Err(AppError::InvalidDate(_))));
    }
}
