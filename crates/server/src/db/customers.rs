//! Customer account and bearer-token repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use table_tap_core::{Customer, CustomerId, Email, ProfilePatch};

use super::RepositoryError;

/// Database row for a customer account, including the password hash.
///
/// Converted to the public [`Customer`] projection before leaving the
/// service layer; the hash and picture bytes never reach the wire.
#[derive(sqlx::FromRow)]
pub struct CustomerRow {
    pub id: CustomerId,
    pub email: Email,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub has_profile_picture: bool,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            phone_number: row.phone_number,
            has_profile_picture: row.has_profile_picture,
        }
    }
}

const CUSTOMER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, date_of_birth, \
                                phone_number, (profile_picture IS NOT NULL) AS has_profile_picture";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<CustomerRow, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r"
            INSERT INTO customer (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {CUSTOMER_COLUMNS}
            ",
        ))
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already registered"))?;

        Ok(row)
    }

    /// Get a customer by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<CustomerRow>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<CustomerRow>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Apply a partial profile update, touching only the present fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    pub async fn apply_patch(
        &self,
        id: CustomerId,
        patch: &ProfilePatch,
    ) -> Result<CustomerRow, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r"
            UPDATE customer
            SET first_name    = COALESCE($2, first_name),
                last_name     = COALESCE($3, last_name),
                date_of_birth = COALESCE($4, date_of_birth),
                phone_number  = COALESCE($5, phone_number),
                updated_at    = now()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.date_of_birth)
        .bind(patch.phone_number.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Store a customer's profile picture.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    pub async fn set_profile_picture(
        &self,
        id: CustomerId,
        content: &[u8],
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE customer SET profile_picture = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(content)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Fetch a customer's profile picture bytes, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    pub async fn get_profile_picture(
        &self,
        id: CustomerId,
    ) -> Result<Option<Vec<u8>>, RepositoryError> {
        let row = sqlx::query_scalar::<_, Option<Vec<u8>>>(
            "SELECT profile_picture FROM customer WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    // =========================================================================
    // Bearer Tokens
    // =========================================================================

    /// Persist an issued bearer token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_token(
        &self,
        token: &str,
        customer_id: CustomerId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO customer_token (token, customer_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(customer_id)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Resolve a bearer token to its owner and expiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn resolve_token(
        &self,
        token: &str,
    ) -> Result<Option<(CustomerId, DateTime<Utc>)>, RepositoryError> {
        let row = sqlx::query_as::<_, (CustomerId, DateTime<Utc>)>(
            "SELECT customer_id, expires_at FROM customer_token WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Delete expired tokens; returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn prune_expired_tokens(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_token WHERE expires_at < now()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
