use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{AppError, Result};

/// Closed date interval used to filter the ledger for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Relative month selector for the monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    Current,
    Last,
}

/// A resolved calendar month window plus its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub window: ReportWindow,
    pub year: i32,
    pub month: u32,
}

impl ReportWindow {
    /// Resolve the shared year / explicit-range / default-year precedence:
    /// an explicit `year` wins, then a `startDate`+`endDate` pair (inclusive
    /// of both days), otherwise the current calendar year.
    pub fn resolve(
        year: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if let Some(year) = year {
            return Self::calendar_year(year);
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            return Ok(Self::date_range(start, end));
        }
        Self::calendar_year(now.year())
    }

    /// [Jan 1 00:00:00, Dec 31 23:59:59.999] of the given year.
    pub fn calendar_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;

        Ok(Self::date_range(start, end))
    }

    /// Both days inclusive.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    /// Trailing window of `days` days ending today.
    pub fn trailing_days(days: u64, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let start = today - Days::new(days);

        Self {
            start: start_of_day(start),
            end: end_of_day(today),
        }
    }

    /// Resolve the monthly-report selector: `current`/`last` filters, then
    /// an explicit month (with optional year), defaulting to the current
    /// month.
    pub fn calendar_month(
        filter: Option<MonthFilter>,
        month: Option<u32>,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<MonthWindow> {
        let (target_year, target_month) = match (filter, month, year) {
            (Some(MonthFilter::Current), _, _) => (now.year(), now.month()),
            (Some(MonthFilter::Last), _, _) => previous_month(now.year(), now.month()),
            (None, Some(month), Some(year)) => (year, month),
            (None, Some(month), None) => (now.year(), month),
            _ => (now.year(), now.month()),
        };

        let start = NaiveDate::from_ymd_opt(target_year, target_month, 1).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid month: {}-{}",
                target_year, target_month
            ))
        })?;

        let first_of_next = if target_month == 12 {
            NaiveDate::from_ymd_opt(target_year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(target_year, target_month + 1, 1)
        }
        .ok_or_else(|| AppError::validation("Invalid month"))?;

        let last_day = first_of_next - Days::new(1);

        Ok(MonthWindow {
            window: Self::date_range(start, last_day),
            year: target_year,
            month: target_month,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).expect("valid time").and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid time")
        .and_utc()
}
