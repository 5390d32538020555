pub mod health;
pub mod tracks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tracks                                 list, upload
/// /tracks/filter                          category filter
/// /tracks/{beat_id}                       detail, edit, delete
/// /tracks/{beat_id}/closed                toggle closed
/// /tracks/{beat_id}/download              audio location
/// /tracks/{beat_id}/comments              list, post
/// /tracks/comments/{comment_id}           delete comment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tracks", tracks::router())
}
