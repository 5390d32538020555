//! Handlers for comments on a beat.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use track1_core::error::CoreError;
use track1_core::messages;
use track1_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::upload::{discard_uploads, store_upload, CommentForm, AUDIO_EXTENSIONS};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireVocal;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tracks/{beat_id}/comments?page=&limit=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(beat_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let comments = state
        .tracks
        .list_comments(beat_id, user.user_id, params.to_page())
        .await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/tracks/{beat_id}/comments (multipart)
///
/// Upload a vocal recording and attach it to the beat.
pub async fn create(
    State(state): State<AppState>,
    RequireVocal(user): RequireVocal,
    Path(beat_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = CommentForm::from_multipart(multipart).await?;
    let wav_file = form
        .wav_file
        .ok_or_else(|| CoreError::Validation(messages::MISSING_AUDIO_FILE.into()))?;

    let store = state.store.as_ref();
    let audio = store_upload(
        store,
        &state.tracks.media().wav_bucket,
        wav_file,
        AUDIO_EXTENSIONS,
        messages::UNSUPPORTED_AUDIO_FILE,
    )
    .await?;

    let comment = match state
        .tracks
        .post_comment(beat_id, user.user_id, form.content, audio.location.clone())
        .await
    {
        Ok(comment) => comment,
        Err(e) => {
            discard_uploads(store, std::slice::from_ref(&audio)).await;
            return Err(e);
        }
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/v1/tracks/comments/{comment_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireVocal(user): RequireVocal,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.tracks.delete_comment(comment_id, user.user_id).await?;
    Ok(Json(DataResponse { data: deleted }))
}
