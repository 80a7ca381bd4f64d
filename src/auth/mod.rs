//! Credential checks for the two protected endpoints.
//!
//! Users are identified by a username/password pair; the administrator is
//! identified by the password alone. The two checks are independent.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::headers::authorization::{Basic, Credentials as _};
use axum_extra::headers::{Authorization, HeaderMapExt};
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Admin authentication required")]
    AdminRequired,
}

/// Username and password presented with a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Decode an `Authorization: Basic ...` header.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let Authorization(basic) = headers.typed_get::<Authorization<Basic>>()?;
        Some(Self::new(basic.username(), basic.password()))
    }

    /// Value for an `Authorization` header carrying these credentials.
    pub fn to_header_value(&self) -> HeaderValue {
        Authorization::basic(&self.username, &self.password).0.encode()
    }
}

/// An authenticated regular user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

pub trait AccessControl: Send + Sync {
    fn authenticate_user(&self, credentials: &Credentials) -> Result<Identity, AuthError>;

    /// Only the password is considered.
    fn authenticate_admin(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Fixed user registry and admin secret, usually built from configuration.
pub struct StaticAccessControl {
    users: HashMap<String, String>,
    admin_password: String,
}

impl StaticAccessControl {
    pub fn new(users: HashMap<String, String>, admin_password: impl Into<String>) -> Self {
        Self {
            users,
            admin_password: admin_password.into(),
        }
    }
}

impl AccessControl for StaticAccessControl {
    fn authenticate_user(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        match self.users.get(&credentials.username) {
            Some(expected)
                if constant_time_eq(expected.as_bytes(), credentials.password.as_bytes()) =>
            {
                Ok(Identity {
                    username: credentials.username.clone(),
                })
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    fn authenticate_admin(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if !self.admin_password.is_empty()
            && constant_time_eq(
                self.admin_password.as_bytes(),
                credentials.password.as_bytes(),
            )
        {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }
}
