mod package_controller;
mod service_controller;

pub use package_controller::configure as configure_packages;
pub use service_controller::configure as configure_services;
