//! Multipart form parsing and object uploads for beat and comment creation.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use track1_core::error::CoreError;
use track1_core::messages;
use track1_core::tags::split_tags;
use track1_storage::MediaStore;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Accepted audio file extensions.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "flac", "ogg"];

/// Accepted jacket image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// A file part read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension of the client-side file name, `""` if none.
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }
}

/// An object written during the current request, kept so it can be removed
/// again if the request fails afterwards.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub bucket: String,
    pub key: String,
    pub location: String,
}

/// Fields of a beat upload form.
#[derive(Debug, Default)]
pub struct BeatForm {
    pub title: String,
    pub category: Vec<String>,
    pub introduce: Option<String>,
    pub keyword: Vec<String>,
    pub wav_file: Option<UploadedFile>,
    pub jacket_image: Option<UploadedFile>,
}

impl BeatForm {
    /// Read a beat form. `category` and `keyword` may be repeated or
    /// comma-separated; unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = BeatForm::default();

        while let Some(field) = next_field(&mut multipart).await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "title" => form.title = read_text(field).await?.trim().to_string(),
                "category" => form.category.extend(split_tags(&read_text(field).await?)),
                "keyword" => form.keyword.extend(split_tags(&read_text(field).await?)),
                "introduce" => {
                    let text = read_text(field).await?;
                    if !text.trim().is_empty() {
                        form.introduce = Some(text);
                    }
                }
                "wavFile" => form.wav_file = read_file(field).await?,
                "jacketImage" => form.jacket_image = read_file(field).await?,
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

/// Fields of a comment upload form.
#[derive(Debug, Default)]
pub struct CommentForm {
    pub content: Option<String>,
    pub wav_file: Option<UploadedFile>,
}

impl CommentForm {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = CommentForm::default();

        while let Some(field) = next_field(&mut multipart).await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "content" => {
                    let text = read_text(field).await?;
                    if !text.trim().is_empty() {
                        form.content = Some(text);
                    }
                }
                "wavFile" => form.wav_file = read_file(field).await?,
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Oversized bodies surface as 413, every other form error as 400.
fn multipart_error(err: MultipartError) -> AppError {
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(err.body_text()),
        _ => AppError::BadRequest(err.body_text()),
    }
}

async fn next_field(multipart: &mut Multipart) -> AppResult<Option<Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(multipart_error)
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(multipart_error)
}

/// Read a file part. Browsers send an empty, unnamed part for a file input
/// left blank; that counts as no file.
async fn read_file(field: Field<'_>) -> AppResult<Option<UploadedFile>> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(multipart_error)?;

    if bytes.is_empty() && file_name.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// Storage key for a new object: `<unix millis>_<uuid>.<ext>`.
pub fn generate_key(ext: &str) -> String {
    format!(
        "{}_{}.{ext}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4()
    )
}

/// Content type to store with an object. The client's declared type wins
/// unless it is missing or generic.
fn content_type_for(file: &UploadedFile, ext: &str) -> String {
    if let Some(declared) = &file.content_type {
        if declared != "application/octet-stream" {
            return declared.clone();
        }
    }
    match ext {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Check the file's extension against `allowed`, then store it in `bucket`
/// under a fresh key.
pub async fn store_upload(
    store: &dyn MediaStore,
    bucket: &str,
    file: UploadedFile,
    allowed: &[&str],
    unsupported_message: &str,
) -> AppResult<StoredUpload> {
    let ext = file.extension();
    if !allowed.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "{unsupported_message}: '.{ext}' (supported: {})",
            allowed.join(", ")
        ))
        .into());
    }

    let key = generate_key(&ext);
    let content_type = content_type_for(&file, &ext);
    let location = store
        .put(bucket, &key, file.bytes, &content_type)
        .await
        .map_err(|e| {
            tracing::error!(bucket, key = %key, error = %e, "Upload failed");
            AppError::Core(CoreError::Internal(messages::FAIL_UPLOAD_S3_OBJECT.into()))
        })?;

    Ok(StoredUpload {
        bucket: bucket.to_string(),
        key,
        location,
    })
}

/// Best-effort removal of objects stored earlier in a failed request.
/// Failures are logged, never returned.
pub async fn discard_uploads(store: &dyn MediaStore, uploads: &[StoredUpload]) {
    for upload in uploads {
        if let Err(e) = store.delete(&upload.bucket, &upload.key).await {
            tracing::warn!(
                bucket = %upload.bucket,
                key = %upload.key,
                error = %e,
                "Failed to discard upload after request failure",
            );
        }
    }
}
