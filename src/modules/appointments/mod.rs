// Appointments module: the booking ledger and its lifecycle rules

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Appointment, AppointmentStatus};
pub use repositories::AppointmentRepository;
pub use services::AppointmentService;
