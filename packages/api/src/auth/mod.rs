//! # Authentication service
//!
//! Registers users, verifies credentials, and issues/validates the bearer
//! tokens every protected route requires. Backed by the `users` collection
//! of the document store; passwords are Argon2id hashes ([`password`]),
//! tokens are signed JWTs ([`token`]).

mod password;
mod token;

pub use token::Claims;

use std::sync::Arc;

use chrono::Duration;
use store::{Document, DocumentStore};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{User, UserFields, UserInfo, USERS};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
    secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>, secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            store,
            secret: secret.into(),
            token_ttl: Duration::hours(ttl_hours),
        }
    }

    /// Create a user and log them straight in. Fails with a validation
    /// error on a blank name, an implausible email, a short password, or an
    /// email that is already taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, UserInfo), ApiError> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        if password.len() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if name.is_empty() {
            return Err(ApiError::Validation("Name is required".into()));
        }
        if self
            .store
            .find_by_field(USERS, "email", &email)
            .await?
            .is_some()
        {
            return Err(ApiError::Validation(
                "An account with this email already exists".into(),
            ));
        }

        let fields = UserFields {
            name,
            email,
            password_hash: password::hash_password(password)?,
        };
        let doc = self.store.insert(USERS, Document::self_owned(&fields)?).await?;
        let user = User::from_document(&doc)?;
        tracing::info!(user = %user.id, "registered new user");

        let token = token::issue(user.id, &self.secret, self.token_ttl)?;
        Ok((token, user.to_info()))
    }

    /// Verify credentials and issue a token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let email = email.trim().to_lowercase();

        let doc = self
            .store
            .find_by_field(USERS, "email", &email)
            .await?
            .ok_or(ApiError::BadCredentials)?;
        let user = User::from_document(&doc)?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(ApiError::BadCredentials);
        }

        token::issue(user.id, &self.secret, self.token_ttl)
    }

    /// Validate the `Authorization` header of a protected request and yield
    /// the caller's user id. Runs before any store access.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Uuid, ApiError> {
        let raw = token::bearer(authorization)?;
        token::verify(raw, &self.secret)
    }

    /// Public view of a user, for `/api/auth/me`.
    pub async fn profile(&self, user_id: Uuid) -> Result<UserInfo, ApiError> {
        let doc = self
            .store
            .get(USERS, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
        Ok(User::from_document(&doc)?.to_info())
    }
}
