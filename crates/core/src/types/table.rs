//! Wire DTOs for dining tables and QR entry.

use serde::{Deserialize, Serialize};

use crate::types::id::{RestaurantId, TableId};
use crate::types::status::TableStatus;

/// A dining table as managed through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub restaurant_id: RestaurantId,
    /// Human-facing table number, unique within the restaurant.
    pub table_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: TableStatus,
    /// Whether a QR token is currently provisioned for the table.
    #[serde(default)]
    pub has_qr_token: bool,
}

/// The table context a QR scan resolves to.
///
/// Persisted by the ordering client for the duration of the browsing
/// session; switching to a different table replaces it as a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableContext {
    pub table_id: TableId,
    pub restaurant_id: RestaurantId,
    pub table_number: String,
}

/// QR entry data returned by the admin QR endpoints.
///
/// Only the token and the entry URL are produced here; rendering the
/// token as an image is a presentation concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeData {
    pub table_id: TableId,
    pub token: String,
    /// Full entry URL the QR image encodes (`{base}/menu?table=...&token=...`).
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_context_roundtrip() {
        let ctx = TableContext {
            table_id: TableId::generate(),
            restaurant_id: RestaurantId::generate(),
            table_number: "12".to_owned(),
        };

        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"tableNumber\":\"12\""));
        let back: TableContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
