// Auth module: user accounts, login and bearer tokens

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{User, UserRole};
pub use repositories::UserRepository;
pub use services::AuthService;
