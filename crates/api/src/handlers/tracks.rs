//! Handlers for the `/tracks` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use track1_core::error::CoreError;
use track1_core::messages;
use track1_core::types::DbId;
use track1_db::models::beat::UpdateBeat;

use crate::error::AppResult;
use crate::handlers::upload::{
    discard_uploads, store_upload, BeatForm, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS,
};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireProducer;
use crate::query::{FilterParams, PageParams};
use crate::response::DataResponse;
use crate::services::dto::NewBeat;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tracks?page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let beats = state.tracks.list_beats(params.to_page()).await?;
    Ok(Json(DataResponse { data: beats }))
}

/// GET /api/v1/tracks/filter?categ=a,b&page=&limit=
///
/// Open beats sharing at least one of the given categories.
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<impl IntoResponse> {
    let beats = state
        .tracks
        .list_filtered_beats(&params.categories(), params.to_page())
        .await?;
    Ok(Json(DataResponse { data: beats }))
}

/// POST /api/v1/tracks (multipart)
///
/// Upload a beat's audio and optional jacket image, then create the beat.
/// Objects stored by this request are removed again if creation fails.
pub async fn create(
    State(state): State<AppState>,
    RequireProducer(user): RequireProducer,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = BeatForm::from_multipart(multipart).await?;
    let wav_file = form
        .wav_file
        .ok_or_else(|| CoreError::Validation(messages::MISSING_AUDIO_FILE.into()))?;

    let store = state.store.as_ref();
    let media = state.tracks.media();
    let mut uploads = Vec::with_capacity(2);

    let audio = store_upload(
        store,
        &media.beat_bucket,
        wav_file,
        AUDIO_EXTENSIONS,
        messages::UNSUPPORTED_AUDIO_FILE,
    )
    .await?;
    uploads.push(audio.clone());

    let image_location = match form.jacket_image {
        Some(image) => {
            let stored = match store_upload(
                store,
                &media.beat_bucket,
                image,
                IMAGE_EXTENSIONS,
                messages::UNSUPPORTED_IMAGE_FILE,
            )
            .await
            {
                Ok(stored) => stored,
                Err(e) => {
                    discard_uploads(store, &uploads).await;
                    return Err(e);
                }
            };
            uploads.push(stored.clone());
            stored.location
        }
        None => media.default_jacket_image.clone(),
    };

    let input = NewBeat {
        title: form.title,
        category: form.category,
        introduce: form.introduce,
        keyword: form.keyword,
    };
    let beat = match state
        .tracks
        .create_beat(user.user_id, input, image_location, audio.location)
        .await
    {
        Ok(beat) => beat,
        Err(e) => {
            discard_uploads(store, &uploads).await;
            return Err(e);
        }
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: beat })))
}

/// GET /api/v1/tracks/{beat_id}
pub async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(beat_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let beat = state.tracks.get_beat_detail(beat_id, user.user_id).await?;
    Ok(Json(DataResponse { data: beat }))
}

/// PATCH /api/v1/tracks/{beat_id}
///
/// Owner-only edit of title, introduce, category and keyword. Omitted fields
/// keep their values.
pub async fn update(
    State(state): State<AppState>,
    RequireProducer(user): RequireProducer,
    Path(beat_id): Path<DbId>,
    Json(input): Json<UpdateBeat>,
) -> AppResult<impl IntoResponse> {
    let beat = state
        .tracks
        .update_beat_info(beat_id, user.user_id, input)
        .await?;
    Ok(Json(DataResponse { data: beat }))
}

/// DELETE /api/v1/tracks/{beat_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireProducer(user): RequireProducer,
    Path(beat_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.tracks.delete_beat(beat_id, user.user_id).await?;
    Ok(Json(DataResponse { data: deleted }))
}

/// PATCH /api/v1/tracks/{beat_id}/closed
pub async fn toggle_closed(
    State(state): State<AppState>,
    RequireProducer(_user): RequireProducer,
    Path(beat_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let beat = state.tracks.toggle_beat_closed(beat_id).await?;
    Ok(Json(DataResponse { data: beat }))
}

/// GET /api/v1/tracks/{beat_id}/download
pub async fn download(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(beat_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let location = state.tracks.get_beat_location(beat_id).await?;
    Ok(Json(DataResponse { data: location }))
}
