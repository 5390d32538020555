//! Conversions between object keys and their public S3 locations.
//!
//! Persisted file references are full virtual-hosted-style URLs such as
//! `https://track1-bucket.s3.ap-northeast-2.amazonaws.com/1700000000000_ab12.wav`.
//! Deleting an object needs the key back, percent-decoded.

/// Public location of `key` in `bucket`.
pub fn object_location(bucket: &str, region: &str, key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!(
        "https://{bucket}.s3.{region}.amazonaws.com/{}",
        encoded.join("/")
    )
}

/// Recover the object key of `location` within `bucket`.
///
/// Accepts virtual-hosted-style and path-style URLs. A value without a
/// scheme is treated as a bare key and returned unchanged. Returns `None`
/// for URLs that point outside `bucket`.
pub fn object_key_from_location(location: &str, bucket: &str) -> Option<String> {
    let Some(rest) = location
        .strip_prefix("https://")
        .or_else(|| location.strip_prefix("http://"))
    else {
        return Some(location.to_string());
    };

    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    let (host, path) = rest.split_once('/')?;

    let raw_key = if host == bucket || host.starts_with(&format!("{bucket}.s3")) {
        path
    } else if host.starts_with("s3.") || host.starts_with("s3-") {
        path.strip_prefix(bucket)?.strip_prefix('/')?
    } else {
        return None;
    };

    if raw_key.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(raw_key)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw_key.to_string());
    Some(decoded)
}
