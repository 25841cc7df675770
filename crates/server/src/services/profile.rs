//! Customer profile service.

use sqlx::PgPool;

use table_tap_core::{Customer, CustomerId, ProfilePatch};

use crate::db::customers::CustomerRepository;
use crate::error::{AppError, Result};

/// Customer profile service.
pub struct ProfileService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Fetch the public profile projection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown customer.
    pub async fn get(&self, id: CustomerId) -> Result<Customer> {
        self.customers
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("customer not found".to_owned()))
    }

    /// Apply a partial profile update.
    ///
    /// Fields absent from the patch are left untouched; an empty patch is
    /// accepted and returns the unchanged profile.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown customer.
    pub async fn update(&self, id: CustomerId, patch: ProfilePatch) -> Result<Customer> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let row = self.customers.apply_patch(id, &patch).await?;
        Ok(row.into())
    }

    /// Store the customer's profile picture.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty upload,
    /// `AppError::NotFound` for an unknown customer.
    pub async fn upload_picture(&self, id: CustomerId, content: &[u8]) -> Result<()> {
        if content.is_empty() {
            return Err(AppError::Validation("no file provided".to_owned()));
        }

        Ok(self.customers.set_profile_picture(id, content).await?)
    }

    /// Fetch the customer's profile picture bytes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the customer or the picture is absent.
    pub async fn get_picture(&self, id: CustomerId) -> Result<Vec<u8>> {
        self.customers
            .get_profile_picture(id)
            .await?
            .ok_or_else(|| AppError::NotFound("profile picture not found".to_owned()))
    }
}
