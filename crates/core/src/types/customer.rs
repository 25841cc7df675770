//! Wire DTOs for customer identity and profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::CustomerId;

/// Public projection of a customer record.
///
/// Never carries the password hash or profile-picture bytes; the picture
/// is fetched separately and signalled via `has_profile_picture`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub has_profile_picture: bool,
}

/// Credential-exchange result returned by login and signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Opaque bearer token for subsequent authenticated requests.
    pub access_token: String,
    pub user: Customer,
}

/// Partial profile update.
///
/// Each field is applied only when present; absent fields leave the stored
/// value untouched. Unknown keys are rejected rather than silently
/// accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfilePatch {
    /// Whether the patch carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.phone_number.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_patch_rejects_unknown_keys() {
        let json = serde_json::json!({"firstName": "Ada", "role": "admin"});
        assert!(serde_json::from_value::<ProfilePatch>(json).is_err());
    }

    #[test]
    fn test_profile_patch_partial() {
        let json = serde_json::json!({"lastName": "Lovelace"});
        let patch: ProfilePatch = serde_json::from_value(json).unwrap();
        assert!(patch.first_name.is_none());
        assert_eq!(patch.last_name.as_deref(), Some("Lovelace"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_auth_response_wire_shape() {
        let resp = AuthResponse {
            access_token: "tok".to_owned(),
            user: Customer {
                id: CustomerId::generate(),
                email: Email::parse("diner@example.com").unwrap(),
                first_name: None,
                last_name: None,
                date_of_birth: None,
                phone_number: None,
                has_profile_picture: false,
            },
        };

        let json = serde_json::to_value(&resp).unwrap();
        // snake_case envelope matches the credential-exchange contract
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["user"]["email"], "diner@example.com");
    }
}
