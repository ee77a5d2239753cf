// Staff module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::StaffMember;
pub use repositories::StaffRepository;
