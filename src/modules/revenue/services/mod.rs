pub mod report_window;
pub mod revenue_service;

pub use report_window::{MonthFilter, MonthWindow, ReportWindow};
pub use revenue_service::RevenueService;
