use rust_decimal::Decimal;

use crate::modules::catalog::models::Service;

/// Authoritative duration and price for an appointment, derived from its
/// selected services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTotals {
    /// Minutes
    pub duration: i32,
    pub price: Decimal,
}

/// Sum duration and price over the selected services.
///
/// Pure and deterministic; the reference validator guarantees the slice is
/// non-empty before this runs.
pub fn derive_totals(services: &[Service]) -> ServiceTotals {
    ServiceTotals {
        duration: services.iter().map(|s| s.duration).sum(),
        price: services.iter().map(|s| s.price).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::models::{CreateServiceRequest, ServiceCategory};
    use rust_decimal_macros::dec;

    fn service(duration: i32, price: Decimal) -> Service {
        Service::new(CreateServiceRequest {
            name: format!("svc-{}-{}", duration, price),
            description: None,
            category: ServiceCategory::Other,
            duration,
            price,
            is_popular: None,
            icon: None,
        })
        .unwrap()
    }

    #[test]
    fn test_two_services_sum() {
        let services = vec![service(30, dec!(20)), service(45, dec!(35))];
        let totals = derive_totals(&services);
        assert_eq!(totals.duration, 75);
        assert_eq!(totals.price, dec!(55));
    }

    #[test]
    fn test_single_service_is_identity() {
        let services = vec![service(60, dec!(80))];
        let totals = derive_totals(&services);
        assert_eq!(totals.duration, 60);
        assert_eq!(totals.price, dec!(80));
    }
}
