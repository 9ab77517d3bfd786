//! Authenticated principal carried by bearer tokens
//!
//! Tokens are issued by the marketplace's identity provider; this server only
//! validates them and reads the email and role they carry.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

use super::shop::Shop;

/// Marketplace role of the principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, role: Role, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            email: email.into(),
            role,
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Create JWT token
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

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners may manage their own shop; admins any shop
    pub fn require_shop_owner(&self, shop: &Shop) -> Result<(), AppError> {
        if self.is_admin() {
            return Ok(());
        }
        if self.role == Role::Owner && shop.owner_email.eq_ignore_ascii_case(&self.email) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Only the owner of shop {} can manage its schedule",
                shop.id
            )))
        }
    }
}
