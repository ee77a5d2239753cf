// Revenue module: aggregation reports over the appointment ledger

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use repositories::RevenueRepository;
pub use services::RevenueService;
