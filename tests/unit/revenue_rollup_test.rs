//! Tests for the in-process revenue rollups: trend filling, daily
//! summaries and the monthly report's skip-on-missing-reference policy.

use chrono::{NaiveDate, TimeZone, Utc};
use glowdesk::modules::catalog::models::ServiceCategory;
use glowdesk::modules::revenue::models::{CompletedSale, DailyBucket, MonthBucket, ServiceSale};
use glowdesk::modules::revenue::services::revenue_service::{
    average, count_unique_customers, fill_trend_months, rollup_by_category,
    rollup_by_staff, rollup_daily_breakdown, summarize_daily,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sale(
    id: &str,
    price: Decimal,
    day: u32,
    customer: Option<&str>,
    staff: Option<(&str, &str)>,
) -> CompletedSale {
    CompletedSale {
        appointment_id: id.to_string(),
        price,
        appointment_date: Utc.with_ymd_and_hms(2024, 3, day, 14, 0, 0).unwrap(),
        customer_id: customer.map(str::to_string),
        staff_id: staff.map(|(id, _)| id.to_string()),
        staff_name: staff.map(|(_, name)| name.to_string()),
    }
}

#[test]
fn test_average_of_empty_group_is_zero() {
    assert_eq!(average(Decimal::ZERO, 0), Decimal::ZERO);
    assert_eq!(average(dec!(100), 0), Decimal::ZERO);
}

#[test]
fn test_average_rounds_to_cents() {
    assert_eq!(average(dec!(100), 3), dec!(33.33));
    assert_eq!(average(dec!(300), 2), dec!(150));
}

#[test]
fn test_trends_always_have_twelve_months() {
    let buckets = vec![
        MonthBucket {
            month_number: 3,
            revenue: dec!(100),
            appointment_count: 1,
        },
        MonthBucket {
            month_number: 4,
            revenue: dec!(200),
            appointment_count: 1,
        },
    ];

    let trends = fill_trend_months(&buckets);

    assert_eq!(trends.len(), 12);
    assert_eq!(trends[0].month, "Jan");
    assert_eq!(trends[0].revenue, Decimal::ZERO);
    assert_eq!(trends[2].month, "Mar");
    assert_eq!(trends[2].revenue, dec!(100));
    assert_eq!(trends[3].revenue, dec!(200));
    assert_eq!(trends[11].month, "Dec");
    assert_eq!(trends[11].appointment_count, 0);

    for (index, trend) in trends.iter().enumerate() {
        assert_eq!(trend.month_number, (index + 1) as u32);
    }
}

#[test]
fn test_trends_for_an_empty_year() {
    let trends = fill_trend_months(&[]);

    assert_eq!(trends.len(), 12);
    assert!(trends.iter().all(|t| t.revenue == Decimal::ZERO));
    assert!(trends.iter().all(|t| t.appointment_count == 0));
}

#[test]
fn test_daily_summary_averages_over_days_with_revenue() {
    let buckets = vec![
        DailyBucket {
            day: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            revenue: dec!(100),
            appointment_count: 2,
        },
        DailyBucket {
            day: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            revenue: dec!(50),
            appointment_count: 1,
        },
    ];

    let summary = summarize_daily(&buckets);

    assert_eq!(summary.total_revenue, dec!(150));
    assert_eq!(summary.total_appointments, 3);
    assert_eq!(summary.days_with_revenue, 2);
    // 150 over 2 days with revenue, not over the window's calendar days
    assert_eq!(summary.avg_daily_revenue, dec!(75));
}

#[test]
fn test_daily_summary_of_empty_window() {
    let summary = summarize_daily(&[]);

    assert_eq!(summary.total_revenue, Decimal::ZERO);
    assert_eq!(summary.total_appointments, 0);
    assert_eq!(summary.avg_daily_revenue, Decimal::ZERO);
    assert_eq!(summary.days_with_revenue, 0);
}

#[test]
fn test_unique_customers_skips_dangling_references() {
    let sales = vec![
        sale("a1", dec!(100), 5, Some("c1"), Some(("s1", "Maya"))),
        sale("a2", dec!(50), 6, Some("c1"), Some(("s1", "Maya"))),
        sale("a3", dec!(75), 7, Some("c2"), Some(("s1", "Maya"))),
        // Customer deleted since the appointment completed
        sale("a4", dec!(25), 8, None, Some(("s1", "Maya"))),
    ];

    assert_eq!(count_unique_customers(&sales), 2);
}

#[test]
fn test_by_staff_rollup_skips_missing_staff_and_sorts_desc() {
    let sales = vec![
        sale("a1", dec!(100), 5, Some("c1"), Some(("s1", "Maya"))),
        sale("a2", dec!(300), 6, Some("c2"), Some(("s2", "Putri"))),
        sale("a3", dec!(50), 7, Some("c3"), Some(("s1", "Maya"))),
        // Staff member deleted since; the row is skipped, not grouped
        sale("a4", dec!(999), 8, Some("c4"), None),
    ];

    let by_staff = rollup_by_staff(&sales);

    assert_eq!(by_staff.len(), 2);
    assert_eq!(by_staff[0].staff_id, "s2");
    assert_eq!(by_staff[0].total_revenue, dec!(300));
    assert_eq!(by_staff[0].appointment_count, 1);
    assert_eq!(by_staff[0].avg_revenue, dec!(300));
    assert_eq!(by_staff[1].staff_id, "s1");
    assert_eq!(by_staff[1].staff_name, "Maya");
    assert_eq!(by_staff[1].total_revenue, dec!(150));
    assert_eq!(by_staff[1].avg_revenue, dec!(75));
}

#[test]
fn test_by_category_rollup_groups_and_sorts() {
    let service_sales = vec![
        ServiceSale {
            appointment_id: "a1".to_string(),
            category: ServiceCategory::Massage,
            price: dec!(80),
        },
        ServiceSale {
            appointment_id: "a1".to_string(),
            category: ServiceCategory::Facial,
            price: dec!(120),
        },
        ServiceSale {
            appointment_id: "a2".to_string(),
            category: ServiceCategory::Massage,
            price: dec!(90),
        },
    ];

    let by_category = rollup_by_category(&service_sales);

    assert_eq!(by_category.len(), 2);
    assert_eq!(by_category[0].category, ServiceCategory::Massage);
    assert_eq!(by_category[0].total_revenue, dec!(170));
    assert_eq!(by_category[0].service_count, 2);
    assert_eq!(by_category[1].category, ServiceCategory::Facial);
    assert_eq!(by_category[1].total_revenue, dec!(120));
}

#[test]
fn test_daily_breakdown_groups_by_day_of_month() {
    let sales = vec![
        sale("a1", dec!(100), 5, Some("c1"), Some(("s1", "Maya"))),
        sale("a2", dec!(50), 5, Some("c2"), Some(("s1", "Maya"))),
        sale("a3", dec!(75), 9, Some("c3"), Some(("s1", "Maya"))),
    ];

    let breakdown = rollup_daily_breakdown(&sales);

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].day, 5);
    assert_eq!(breakdown[0].revenue, dec!(150));
    assert_eq!(breakdown[0].appointment_count, 2);
    assert_eq!(
        breakdown[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    );
    assert_eq!(breakdown[1].day, 9);
    assert_eq!(breakdown[1].revenue, dec!(75));
}
