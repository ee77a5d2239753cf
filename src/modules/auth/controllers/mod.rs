mod auth_controller;

pub use auth_controller::configure;
