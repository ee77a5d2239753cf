mod package;
mod service;

pub use package::{CreatePackageRequest, Package, UpdatePackageRequest};
pub use service::{
    CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest,
    MAX_SERVICE_DURATION_MINUTES, MIN_SERVICE_DURATION_MINUTES,
};
