mod guard;
mod routes;

use thiserror::Error;
use time::OffsetDateTime;

use crate::core::config::Settings;
use crate::core::metrics;

pub use guard::{validate, AuthError, Identity, Role};
pub use routes::{authorize, AuthzError, RouteArea};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Forbidden(#[from] AuthzError),
}

/// The single entry point the UI layer calls per navigation or API action:
/// credential first, then the role/area matrix. Both checks run on every
/// call; a denial is terminal and the caller decides what to do with it.
pub fn validate_and_authorize(
    credential: Option<&str>,
    area: RouteArea,
    now: OffsetDateTime,
    settings: &Settings,
) -> Result<Identity, AccessError> {
    let identity = guard::validate(credential, now, settings).map_err(|err| {
        tracing::warn!(area = %area, reason = %err, "Credential rejected");
        ::metrics::counter!(metrics::ACCESS_DENIED).increment(1);
        AccessError::Auth(err)
    })?;

    routes::authorize(&identity, area).map_err(|err| {
        tracing::warn!(
            area = %area,
            role = identity.role.as_str(),
            user_id = %identity.user_id,
            "Role denied for area"
        );
        ::metrics::counter!(metrics::ACCESS_DENIED).increment(1);
        AccessError::Forbidden(err)
    })?;

    Ok(identity)
}
