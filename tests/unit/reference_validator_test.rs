//! Tests for appointment reference validation against an in-memory lookup
//! source: existence checks, the inactive-service distinction and the
//! at-least-one-service rule.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use glowdesk::core::{AppError, Result};
use glowdesk::modules::appointments::services::{ReferenceSource, ReferenceValidator};
use glowdesk::modules::catalog::models::{
    CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest,
};
use glowdesk::modules::customers::models::{CreateCustomerRequest, Customer};
use glowdesk::modules::staff::models::{CreateStaffRequest, StaffMember};
use rust_decimal_macros::dec;

#[derive(Default)]
struct InMemorySource {
    customers: HashMap<String, Customer>,
    staff: HashMap<String, StaffMember>,
    services: HashMap<String, Service>,
}

#[async_trait]
impl ReferenceSource for InMemorySource {
    async fn find_customer(&self, id: &str) -> Result<Option<Customer>> {
        Ok(self.customers.get(id).cloned())
    }

    async fn find_staff(&self, id: &str) -> Result<Option<StaffMember>> {
        Ok(self.staff.get(id).cloned())
    }

    async fn find_services(&self, ids: &[String]) -> Result<Vec<Service>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.services.get(id).cloned())
            .collect())
    }
}

fn customer(name: &str, phone: &str) -> Customer {
    Customer::new(CreateCustomerRequest {
        name: name.to_string(),
        phone_number: phone.to_string(),
        email: None,
        address: None,
        notes: None,
    })
    .expect("valid customer")
}

fn staff(name: &str, phone: &str) -> StaffMember {
    StaffMember::new(CreateStaffRequest {
        name: name.to_string(),
        phone_number: phone.to_string(),
    })
    .expect("valid staff member")
}

fn active_service(name: &str, duration: i32) -> Service {
    Service::new(CreateServiceRequest {
        name: name.to_string(),
        description: None,
        category: ServiceCategory::Facial,
        duration,
        price: dec!(40),
        is_popular: None,
        icon: None,
    })
    .expect("valid service")
}

fn fixture() -> (InMemorySource, String, String, String, String) {
    let mut source = InMemorySource::default();

    let c = customer("Amira Hassan", "+620000000001");
    let s = staff("Maya", "+620000000002");
    let svc = active_service("Classic Facial", 45);
    let mut inactive = active_service("Retired Wrap", 60);
    inactive
        .apply_update(UpdateServiceRequest {
            is_active: Some(false),
            ..Default::default()
        })
        .expect("deactivation");

    let (customer_id, staff_id) = (c.id.clone(), s.id.clone());
    let (service_id, inactive_id) = (svc.id.clone(), inactive.id.clone());

    source.customers.insert(c.id.clone(), c);
    source.staff.insert(s.id.clone(), s);
    source.services.insert(svc.id.clone(), svc);
    source.services.insert(inactive.id.clone(), inactive);

    (source, customer_id, staff_id, service_id, inactive_id)
}

#[tokio::test]
async fn test_valid_references_resolve() {
    let (source, customer_id, staff_id, service_id, _) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let resolved = validator
        .validate_references(&customer_id, &staff_id, &[service_id.clone()])
        .await
        .expect("all references valid");

    assert_eq!(resolved.customer.id, customer_id);
    assert_eq!(resolved.staff.id, staff_id);
    assert_eq!(resolved.services.len(), 1);
    assert_eq!(resolved.services[0].id, service_id);
}

#[tokio::test]
async fn test_missing_customer_is_not_found() {
    let (source, _, staff_id, service_id, _) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let err = validator
        .validate_references("missing", &staff_id, &[service_id])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("Customer"));
}

#[tokio::test]
async fn test_missing_staff_is_not_found() {
    let (source, customer_id, _, service_id, _) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let err = validator
        .validate_references(&customer_id, "missing", &[service_id])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_service_id_is_not_found() {
    let (source, customer_id, staff_id, service_id, _) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let err = validator
        .validate_references(
            &customer_id,
            &staff_id,
            &[service_id, "missing".to_string()],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_inactive_service_is_unavailable_not_missing() {
    let (source, customer_id, staff_id, _, inactive_id) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let err = validator
        .validate_references(&customer_id, &staff_id, &[inactive_id])
        .await
        .unwrap_err();

    // The id is valid, so this is an availability failure, not a 404
    assert!(matches!(err, AppError::Unavailable(_)));
    assert!(err.to_string().contains("Retired Wrap"));
}

#[tokio::test]
async fn test_empty_service_list_is_a_validation_error() {
    let (source, customer_id, staff_id, _, _) = fixture();
    let validator = ReferenceValidator::new(Arc::new(source));

    let err = validator
        .validate_references(&customer_id, &staff_id, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}
