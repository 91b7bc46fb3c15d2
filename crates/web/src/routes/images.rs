//! Product image serving with an explicit path-traversal guard.
//!
//! Images are served by bare filename from one configured directory.
//! The filename arrives percent-decoded from the router, so the guard
//! rejects anything that is not a single normal path component before
//! the filesystem is touched.

use std::path::{Component, Path as FsPath};

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Check that a requested filename cannot escape the image directory.
///
/// Accepts only a single `Component::Normal` that does not start with a
/// dot: no separators, no `..`, no absolute paths, no hidden files.
fn is_safe_filename(filename: &str) -> bool {
    if filename.is_empty() || filename.starts_with('.') {
        return false;
    }

    // Reject both separators outright; Windows-style backslashes are a
    // single Normal component on Unix but still untrusted input.
    if filename.contains('/') || filename.contains('\\') {
        return false;
    }

    let mut components = FsPath::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Guess a content type from the file extension.
fn content_type_for(filename: &str) -> &'static str {
    match FsPath::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Serve a product image by filename from the configured image directory.
///
/// Escaping filenames are rejected as not-found before any filesystem
/// access; they never return content from outside the directory.
#[instrument(skip(state))]
pub async fn product_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    if !is_safe_filename(&filename) {
        return Err(AppError::NotFound(format!("image {filename}")));
    }

    let path = state.config().image_dir.join(&filename);

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("image {filename}")))?;

    let content_type = content_type_for(&filename);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filenames_accepted() {
        assert!(is_safe_filename("mug.png"));
        assert!(is_safe_filename("product-1.jpeg"));
        assert!(is_safe_filename("IMG_2041.webp"));
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(!is_safe_filename("../../app.py"));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename("../secrets.env"));
        assert!(!is_safe_filename("images/../../etc/passwd"));
    }

    #[test]
    fn test_separators_rejected() {
        assert!(!is_safe_filename("/etc/passwd"));
        assert!(!is_safe_filename("subdir/image.png"));
        assert!(!is_safe_filename("..\\..\\boot.ini"));
    }

    #[test]
    fn test_empty_and_hidden_rejected() {
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("."));
        assert!(!is_safe_filename(".env"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }
}
