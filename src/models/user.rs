//! User account model and authenticated-identity claims.
//!
//! Authentication itself is delegated to an external identity provider; this
//! server only validates the JWT it issues (shared secret) and reads the named
//! permissions carried in the claims.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Library account. Kept minimal: the catalog only needs it so a book
/// instance's borrower reference resolves to something.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Named permissions carried in the identity provider's claims
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPermissions {
    /// Gates the return transition, independent of ownership
    #[serde(default)]
    pub can_mark_returned: bool,
    /// Gates catalog create/update/delete operations
    #[serde(default)]
    pub manage_catalog: bool,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    #[serde(default)]
    pub permissions: UserPermissions,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_can_mark_returned(&self) -> Result<(), AppError> {
        if self.permissions.can_mark_returned {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Missing permission to mark copies returned".to_string(),
            ))
        }
    }

    pub fn require_manage_catalog(&self) -> Result<(), AppError> {
        if self.permissions.manage_catalog {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Missing permission to manage the catalog".to_string(),
            ))
        }
    }
}
