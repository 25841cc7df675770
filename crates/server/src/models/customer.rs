//! Authenticated-customer types.

use table_tap_core::{CustomerId, Email};

/// The customer resolved from a bearer token.
///
/// Minimal identity attached to the request; the full profile is loaded
/// on demand by the profile service.
#[derive(Debug, Clone)]
pub struct CurrentCustomer {
    /// Customer's database ID.
    pub id: CustomerId,
    /// Customer's email address.
    pub email: Email,
}
