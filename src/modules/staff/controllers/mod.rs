mod staff_controller;

pub use staff_controller::configure;
