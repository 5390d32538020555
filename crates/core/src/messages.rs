//! Response message catalog.
//!
//! Every user-visible error or success message lives here so handlers and
//! the error mapper never hand-write wording.

pub const SERVER_BANNER: &str = "Track-1 SERVER OPEN!!";

// Beats
pub const BEAT_UPLOAD_FAIL: &str = "Failed to upload the beat";
pub const INVALID_BEAT_ID: &str = "Invalid beat id";
pub const NOT_PRODUCER_BEAT: &str = "The beat does not belong to this producer";
pub const EMPTY_CATEGORY_FILTER: &str = "At least one category is required to filter";

// Comments
pub const COMMENT_UPLOAD_FAIL: &str = "Failed to upload the comment";
pub const NOT_VOCAL_COMMENT: &str = "The comment does not belong to this vocal";

// Storage
pub const FAIL_DELETE_S3_OBJECT: &str = "Failed to delete the stored file";
pub const FAIL_UPLOAD_S3_OBJECT: &str = "Failed to store the uploaded file";
pub const MISSING_AUDIO_FILE: &str = "An audio file is required";
pub const UNSUPPORTED_AUDIO_FILE: &str = "Unsupported audio file type";
pub const UNSUPPORTED_IMAGE_FILE: &str = "Unsupported image file type";

// Identity
pub const NO_USER: &str = "User does not exist";
pub const MISSING_TOKEN: &str = "Missing Authorization header";
pub const MALFORMED_TOKEN: &str = "Invalid Authorization format. Expected: Bearer <token>";
pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const PRODUCER_ONLY: &str = "Producer role required";
pub const VOCAL_ONLY: &str = "Vocal role required";

// Generic
pub const INTERNAL_SERVER_ERROR: &str = "An internal error occurred";
