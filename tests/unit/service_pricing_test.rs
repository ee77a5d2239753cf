//! Tests for the derived appointment duration/price totals: the totals are
//! always the sums over the selected services, never client-supplied.

use glowdesk::modules::appointments::services::derive_totals;
use glowdesk::modules::catalog::models::{CreateServiceRequest, Service, ServiceCategory};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn service(duration: i32, price: Decimal) -> Service {
    Service::new(CreateServiceRequest {
        name: format!("service {} {}", duration, price),
        description: None,
        category: ServiceCategory::Other,
        duration,
        price,
        is_popular: None,
        icon: None,
    })
    .expect("valid service")
}

#[test]
fn test_two_service_booking() {
    // 30min/20 + 45min/35 books as 75 minutes at 55
    let services = vec![service(30, dec!(20)), service(45, dec!(35))];
    let totals = derive_totals(&services);

    assert_eq!(totals.duration, 75);
    assert_eq!(totals.price, dec!(55));
}

#[test]
fn test_single_service_booking() {
    let services = vec![service(90, dec!(120.50))];
    let totals = derive_totals(&services);

    assert_eq!(totals.duration, 90);
    assert_eq!(totals.price, dec!(120.50));
}

#[test]
fn test_free_service_contributes_duration_only() {
    let services = vec![service(60, dec!(80)), service(15, dec!(0))];
    let totals = derive_totals(&services);

    assert_eq!(totals.duration, 75);
    assert_eq!(totals.price, dec!(80));
}

proptest! {
    /// The derived totals equal the component sums for any service list.
    #[test]
    fn test_totals_are_component_sums(
        cases in prop::collection::vec((15i32..=300, 0u32..100_000), 1..8)
    ) {
        let services: Vec<Service> = cases
            .iter()
            .map(|(duration, price)| service(*duration, Decimal::from(*price)))
            .collect();

        let totals = derive_totals(&services);

        let expected_duration: i32 = cases.iter().map(|(d, _)| d).sum();
        let expected_price: Decimal = cases.iter().map(|(_, p)| Decimal::from(*p)).sum();

        prop_assert_eq!(totals.duration, expected_duration);
        prop_assert_eq!(totals.price, expected_price);

        // Totals never go below any single component
        prop_assert!(totals.duration >= cases[0].0);
        prop_assert!(totals.price >= Decimal::ZERO);
    }

    /// Order of the selected services never changes the totals.
    #[test]
    fn test_totals_are_order_insensitive(
        cases in prop::collection::vec((15i32..=300, 0u32..100_000), 1..8)
    ) {
        let services: Vec<Service> = cases
            .iter()
            .map(|(duration, price)| service(*duration, Decimal::from(*price)))
            .collect();
        let mut reversed = services.clone();
        reversed.reverse();

        prop_assert_eq!(derive_totals(&services), derive_totals(&reversed));
    }
}
