//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`], rejects requests carrying the wrong
//! role, and confirms the token subject still exists in the matching
//! account table.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use track1_core::error::CoreError;
use track1_core::messages;
use track1_core::roles::{ROLE_PRODUCER, ROLE_VOCAL};
use track1_db::repositories::{ProducerRepo, VocalRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `producer` role. Rejects with 403 Forbidden otherwise, and
/// with 404 `USER_NOT_FOUND` if the producer row is gone.
///
/// ```ignore
/// async fn producer_only(RequireProducer(user): RequireProducer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireProducer(pub AuthUser);

impl FromRequestParts<AppState> for RequireProducer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_PRODUCER {
            return Err(AppError::Core(CoreError::Forbidden(
                messages::PRODUCER_ONLY.into(),
            )));
        }
        if ProducerRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::UserNotFound(user.user_id)));
        }
        Ok(RequireProducer(user))
    }
}

/// Requires the `vocal` role. Rejects with 403 Forbidden otherwise, and
/// with 404 `USER_NOT_FOUND` if the vocal row is gone.
pub struct RequireVocal(pub AuthUser);

impl FromRequestParts<AppState> for RequireVocal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_VOCAL {
            return Err(AppError::Core(CoreError::Forbidden(
                messages::VOCAL_ONLY.into(),
            )));
        }
        if VocalRepo::find_by_id(&state.pool, user.user_id).await?.is_none() {
            return Err(AppError::Core(CoreError::UserNotFound(user.user_id)));
        }
        Ok(RequireVocal(user))
    }
}
