use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::core::config::Settings;
use crate::core::security;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    pub(crate) fn from_authority(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "INSTRUCTOR" => Some(Role::Instructor),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Instructor => "INSTRUCTOR",
            Role::Student => "STUDENT",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication credentials were not provided")]
    Missing,
    #[error("authentication credentials are malformed")]
    Malformed,
    #[error("authentication credentials have expired")]
    Expired,
}

/// The guard's view of a caller once the credential checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub subject: String,
    pub full_name: Option<String>,
    pub role: Role,
}

/// Validate a bearer credential against the supplied clock.
///
/// Pure function of `(credential, now)` for fixed settings; expiry is judged
/// against the `now` argument, never an implicit wall-clock read. The token's
/// authorities claim is a list; the first entry is the effective role.
pub fn validate(
    credential: Option<&str>,
    now: OffsetDateTime,
    settings: &Settings,
) -> Result<Identity, AuthError> {
    let token =
        credential.map(str::trim).filter(|value| !value.is_empty()).ok_or(AuthError::Missing)?;

    let claims = security::decode_token(token, settings).map_err(|_| AuthError::Malformed)?;

    let role = claims
        .authorities
        .first()
        .and_then(|authority| Role::from_authority(authority))
        .ok_or(AuthError::Malformed)?;

    if claims.user_id.trim().is_empty() {
        return Err(AuthError::Malformed);
    }

    if claims.exp <= now.unix_timestamp() {
        return Err(AuthError::Expired);
    }

    Ok(Identity {
        user_id: claims.user_id,
        subject: claims.sub,
        full_name: claims.fullname,
        role,
    })
}
