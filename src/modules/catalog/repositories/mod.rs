mod package_repository;
mod service_repository;

pub use package_repository::PackageRepository;
pub use service_repository::ServiceRepository;
