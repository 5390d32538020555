//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values; no server
//! or database is needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use track1_api::error::AppError;
use track1_core::error::CoreError;
use track1_core::ffprobe::ProbeError;
use track1_core::messages;
use track1_storage::StorageError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Beat",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Beat with id 42 not found");
}

#[tokio::test]
async fn invalid_beat_id_returns_404_with_catalog_message() {
    let (status, json) = error_to_response(CoreError::InvalidBeatId(7).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_BEAT_ID");
    assert_eq!(json["error"], messages::INVALID_BEAT_ID);
}

#[tokio::test]
async fn ownership_mismatch_returns_403_with_entity_message() {
    let beat = CoreError::OwnershipMismatch {
        entity: "Beat",
        id: 1,
    };
    let (status, json) = error_to_response(beat.into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "OWNERSHIP_MISMATCH");
    assert_eq!(json["error"], messages::NOT_PRODUCER_BEAT);

    let comment = CoreError::OwnershipMismatch {
        entity: "Comment",
        id: 1,
    };
    let (_, json) = error_to_response(comment.into()).await;
    assert_eq!(json["error"], messages::NOT_VOCAL_COMMENT);
}

#[tokio::test]
async fn persistence_error_returns_500() {
    let err = CoreError::Persistence(messages::BEAT_UPLOAD_FAIL.into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "PERSISTENCE_ERROR");
    assert_eq!(json["error"], messages::BEAT_UPLOAD_FAIL);
}

#[tokio::test]
async fn storage_delete_failure_returns_502() {
    let err = StorageError::Delete {
        bucket: "beats".into(),
        message: "AccessDenied".into(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORAGE_DELETE_FAILED");
    assert_eq!(json["error"], messages::FAIL_DELETE_S3_OBJECT);
    assert!(!json.to_string().contains("AccessDenied"));
}

#[tokio::test]
async fn user_not_found_returns_404() {
    let (status, json) = error_to_response(CoreError::UserNotFound(9).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "USER_NOT_FOUND");
    assert_eq!(json["error"], messages::NO_USER);
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("no token provided".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "no token provided");
}

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden(messages::VOCAL_ONLY.into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("title is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "title is required");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("malformed multipart body".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn probe_failure_returns_sanitized_500() {
    let err = ProbeError::ExecutionFailed {
        exit_code: Some(1),
        stderr: "/secret/path: Invalid data".into(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], messages::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn oversized_upload_returns_413() {
    let err = AppError::PayloadTooLarge("length limit exceeded".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["error"], "length limit exceeded");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
