use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::Service;
use crate::modules::catalog::repositories::ServiceRepository;
use crate::modules::customers::models::Customer;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::staff::models::StaffMember;
use crate::modules::staff::repositories::StaffRepository;

/// Lookup seam for the entities an appointment references. Production wires
/// this to the customer/staff/service repositories; tests substitute an
/// in-memory source.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn find_customer(&self, id: &str) -> Result<Option<Customer>>;
    async fn find_staff(&self, id: &str) -> Result<Option<StaffMember>>;
    async fn find_services(&self, ids: &[String]) -> Result<Vec<Service>>;
}

/// `ReferenceSource` backed by the real repositories.
pub struct RepositoryReferenceSource {
    customers: Arc<CustomerRepository>,
    staff: Arc<StaffRepository>,
    services: Arc<ServiceRepository>,
}

impl RepositoryReferenceSource {
    pub fn new(
        customers: Arc<CustomerRepository>,
        staff: Arc<StaffRepository>,
        services: Arc<ServiceRepository>,
    ) -> Self {
        Self {
            customers,
            staff,
            services,
        }
    }
}

#[async_trait]
impl ReferenceSource for RepositoryReferenceSource {
    async fn find_customer(&self, id: &str) -> Result<Option<Customer>> {
        self.customers.find_by_id(id).await
    }

    async fn find_staff(&self, id: &str) -> Result<Option<StaffMember>> {
        self.staff.find_by_id(id).await
    }

    async fn find_services(&self, ids: &[String]) -> Result<Vec<Service>> {
        self.services.find_by_ids(ids).await
    }
}

/// The entities a create request resolved to.
#[derive(Debug)]
pub struct ResolvedReferences {
    pub customer: Customer,
    pub staff: StaffMember,
    pub services: Vec<Service>,
}

/// Confirms that every entity an appointment write references exists and,
/// for services, is still on the catalog.
pub struct ReferenceValidator {
    source: Arc<dyn ReferenceSource>,
}

impl ReferenceValidator {
    pub fn new(source: Arc<dyn ReferenceSource>) -> Self {
        Self { source }
    }

    pub async fn resolve_customer(&self, id: &str) -> Result<Customer> {
        self.source
            .find_customer(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))
    }

    pub async fn resolve_staff(&self, id: &str) -> Result<StaffMember> {
        self.source
            .find_staff(id)
            .await?
            .ok_or_else(|| AppError::not_found("Staff member"))
    }

    /// Resolve a non-empty id list to active services.
    ///
    /// An id that does not exist is a not-found error; an id that resolves
    /// to a deactivated service is a distinct unavailability error, since
    /// the id is valid but the service is withdrawn from the catalog.
    pub async fn resolve_services(&self, ids: &[String]) -> Result<Vec<Service>> {
        if ids.is_empty() {
            return Err(AppError::validation("At least one service is required"));
        }

        let services = self.source.find_services(ids).await?;
        if services.len() != ids.len() {
            return Err(AppError::not_found("One or more services"));
        }

        if let Some(inactive) = services.iter().find(|s| !s.is_active) {
            return Err(AppError::unavailable(format!(
                "Service '{}' is currently unavailable",
                inactive.name
            )));
        }

        Ok(services)
    }

    /// Resolve all three reference sets for a create.
    pub async fn validate_references(
        &self,
        customer_id: &str,
        staff_id: &str,
        service_ids: &[String],
    ) -> Result<ResolvedReferences> {
        let customer = self.resolve_customer(customer_id).await?;
        let staff = self.resolve_staff(staff_id).await?;
        let services = self.resolve_services(service_ids).await?;

        Ok(ResolvedReferences {
            customer,
            staff,
            services,
        })
    }
}
