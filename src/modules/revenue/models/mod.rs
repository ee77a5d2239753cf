mod revenue_report;

pub use revenue_report::{
    CategoryGroupRow, CategoryRevenue, CompletedSale, DailyBucket, DailyReport, DailyRevenue,
    DailySummary, DayBreakdown, MetricsRow, MonthBucket, MonthTrend, MonthlyPeriod,
    MonthlyReport, MonthlySummary, RevenueMetrics, ServiceSale, StaffGroupRow, StaffRevenue,
    StaffRevenueReport, StaffTotalsRow, MONTH_NAMES_LONG, MONTH_NAMES_SHORT,
};
