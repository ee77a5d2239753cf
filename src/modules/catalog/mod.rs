// Catalog module: services and packages

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Package, Service, ServiceCategory};
pub use repositories::{PackageRepository, ServiceRepository};
