pub mod appointment_service;
pub mod pricing;
pub mod reference_validator;

pub use appointment_service::AppointmentService;
pub use pricing::{derive_totals, ServiceTotals};
pub use reference_validator::{
    ReferenceSource, ReferenceValidator, RepositoryReferenceSource, ResolvedReferences,
};
