//! Customer authentication service.
//!
//! Password signup/login with Argon2id hashing, and opaque bearer tokens
//! for subsequent requests. Tokens are random, server-persisted, and carry
//! an absolute expiry; there is no refresh flow - an expired token means
//! logging in again.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;

use table_tap_core::{AuthResponse, Customer, Email};

use crate::db::customers::CustomerRepository;
use crate::models::CurrentCustomer;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Entropy bytes in an issued bearer token (256-bit).
const TOKEN_BYTES: usize = 32;

/// Customer authentication service.
pub struct AuthService<'a> {
    customers: CustomerRepository<'a>,
    token_ttl_hours: i64,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, token_ttl_hours: i64) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
            token_ttl_hours,
        }
    }

    /// Register a new customer and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let row = self
            .customers
            .create(&email, &password_hash, first_name, last_name)
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        self.issue_token(row.into()).await
    }

    /// Authenticate with email and password and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let email = Email::parse(email)?;

        let row = self
            .customers
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &row.password_hash)?;

        self.issue_token(row.into()).await
    }

    /// Resolve a bearer token to the authenticated customer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenInvalid` for unknown tokens and
    /// `AuthError::TokenExpired` past the token's expiry.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentCustomer, AuthError> {
        let (customer_id, expires_at) = self
            .customers
            .resolve_token(token)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if expires_at < Utc::now() {
            return Err(AuthError::TokenExpired);
        }

        let row = self
            .customers
            .get_by_id(customer_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        Ok(CurrentCustomer {
            id: row.id,
            email: row.email,
        })
    }

    async fn issue_token(&self, user: Customer) -> Result<AuthResponse, AuthError> {
        let access_token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.token_ttl_hours);

        self.customers
            .insert_token(&access_token, user.id, expires_at)
            .await?;

        Ok(AuthResponse { access_token, user })
    }
}

/// Generate a random URL-safe bearer token.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_generated_tokens_are_unique_and_urlsafe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(!a.contains('+') && !a.contains('/') && !a.contains('='));
    }
}
