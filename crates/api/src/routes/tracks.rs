//! Route definitions for beats and their comments.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::{comments, tracks};
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create (producer, multipart)
/// GET    /filter                    -> filter by category
/// GET    /{beat_id}                 -> detail
/// PATCH  /{beat_id}                 -> update (producer, owner)
/// DELETE /{beat_id}                 -> delete (producer, owner)
/// PATCH  /{beat_id}/closed          -> toggle closed (producer)
/// GET    /{beat_id}/download        -> audio location
/// GET    /{beat_id}/comments        -> list comments
/// POST   /{beat_id}/comments        -> post comment (vocal, multipart)
/// DELETE /comments/{comment_id}     -> delete comment (vocal, owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tracks::list).post(tracks::create))
        .route("/filter", get(tracks::filter))
        .route(
            "/{beat_id}",
            get(tracks::detail)
                .patch(tracks::update)
                .delete(tracks::delete),
        )
        .route("/{beat_id}/closed", patch(tracks::toggle_closed))
        .route("/{beat_id}/download", get(tracks::download))
        .route(
            "/{beat_id}/comments",
            get(comments::list).post(comments::create),
        )
        .route("/comments/{comment_id}", delete(comments::delete))
}
