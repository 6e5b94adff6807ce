//! Object storage naming helpers
//!
//! Images live in the `photos` bucket under `<owner id>/<upload millis>.<ext>`.
//! Rows only keep the public URL, so deleting an image means recovering the
//! object path from that URL.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Storage bucket holding contest images
pub const BUCKET: &str = "photos";

const FALLBACK_EXTENSION: &str = "jpg";

/// Characters escaped inside an object path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds the object path for a new upload
pub fn object_path(owner_id: &str, file_name: &str, uploaded_at_millis: i64) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    format!("{}/{}.{}", owner_id, uploaded_at_millis, extension)
}

/// Public URL of an object in the contest bucket
pub fn public_url(base_url: &str, object_path: &str) -> String {
    let encoded = object_path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        BUCKET,
        encoded
    )
}

/// Recovers the decoded object path from a public URL.
///
/// Returns `None` when the URL does not point into the bucket.
pub fn object_path_from_url(url: &str) -> Option<String> {
    let marker = format!("/{}/", BUCKET);
    let tail = url.split(marker.as_str()).nth(1)?;
    let tail = tail.split(['?', '#']).next().unwrap_or(tail);

    if tail.is_empty() {
        return None;
    }

    Some(percent_decode_str(tail).decode_utf8_lossy().into_owned())
}
