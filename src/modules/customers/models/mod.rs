mod customer;

pub use customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
