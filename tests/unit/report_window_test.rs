//! Tests for report window resolution: year/range/default precedence,
//! trailing-day windows and calendar-month selection.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use glowdesk::modules::revenue::services::{MonthFilter, ReportWindow};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_explicit_year_wins_over_range() {
    let window = ReportWindow::resolve(
        Some(2023),
        Some(date(2024, 1, 1)),
        Some(date(2024, 2, 1)),
        now(),
    )
    .unwrap();

    assert_eq!(window.start_date(), date(2023, 1, 1));
    assert_eq!(window.end_date(), date(2023, 12, 31));
}

#[test]
fn test_explicit_range_when_no_year() {
    let window =
        ReportWindow::resolve(None, Some(date(2024, 1, 10)), Some(date(2024, 1, 20)), now())
            .unwrap();

    assert_eq!(window.start_date(), date(2024, 1, 10));
    assert_eq!(window.end_date(), date(2024, 1, 20));
    // Both endpoint days are inside the window
    assert!(window.start < window.end);
}

#[test]
fn test_defaults_to_current_year() {
    let window = ReportWindow::resolve(None, None, None, now()).unwrap();

    assert_eq!(window.start_date(), date(2024, 1, 1));
    assert_eq!(window.end_date(), date(2024, 12, 31));
}

#[test]
fn test_partial_range_falls_back_to_current_year() {
    // Only a start date: not a usable range
    let window = ReportWindow::resolve(None, Some(date(2024, 1, 10)), None, now()).unwrap();

    assert_eq!(window.start_date(), date(2024, 1, 1));
    assert_eq!(window.end_date(), date(2024, 12, 31));
}

#[test]
fn test_year_window_covers_whole_final_day() {
    let window = ReportWindow::calendar_year(2024).unwrap();
    let last_moment = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

    assert!(window.end >= last_moment);
    assert_eq!(window.end.year(), 2024);
}

#[test]
fn test_trailing_days_window() {
    let window = ReportWindow::trailing_days(7, now());

    assert_eq!(window.start_date(), date(2024, 3, 8));
    assert_eq!(window.end_date(), date(2024, 3, 15));
}

#[test]
fn test_month_filter_current() {
    let month = ReportWindow::calendar_month(Some(MonthFilter::Current), None, None, now()).unwrap();

    assert_eq!(month.year, 2024);
    assert_eq!(month.month, 3);
    assert_eq!(month.window.start_date(), date(2024, 3, 1));
    assert_eq!(month.window.end_date(), date(2024, 3, 31));
}

#[test]
fn test_month_filter_last_crosses_year_boundary() {
    let january = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    let month = ReportWindow::calendar_month(Some(MonthFilter::Last), None, None, january).unwrap();

    assert_eq!(month.year, 2023);
    assert_eq!(month.month, 12);
    assert_eq!(month.window.end_date(), date(2023, 12, 31));
}

#[test]
fn test_specific_month_and_year() {
    let month = ReportWindow::calendar_month(None, Some(2), Some(2024), now()).unwrap();

    assert_eq!(month.window.start_date(), date(2024, 2, 1));
    // 2024 is a leap year
    assert_eq!(month.window.end_date(), date(2024, 2, 29));
}

#[test]
fn test_month_without_year_uses_current_year() {
    let month = ReportWindow::calendar_month(None, Some(11), None, now()).unwrap();

    assert_eq!(month.year, 2024);
    assert_eq!(month.month, 11);
    assert_eq!(month.window.end_date(), date(2024, 11, 30));
}

#[test]
fn test_no_parameters_defaults_to_current_month() {
    let month = ReportWindow::calendar_month(None, None, None, now()).unwrap();

    assert_eq!(month.year, 2024);
    assert_eq!(month.month, 3);
}

#[test]
fn test_filter_wins_over_explicit_month() {
    let month =
        ReportWindow::calendar_month(Some(MonthFilter::Current), Some(7), Some(2020), now())
            .unwrap();

    assert_eq!(month.year, 2024);
    assert_eq!(month.month, 3);
}
