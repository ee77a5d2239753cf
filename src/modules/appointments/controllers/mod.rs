mod appointment_controller;

pub use appointment_controller::configure;
