//! Server-side domain types.

pub mod customer;

pub use customer::CurrentCustomer;
