//! Product image upload handling
//!
//! Files are written under `<static_dir>/uploads/products/` and stored in
//! the database as paths relative to the static root, so they can be served
//! back under `/static/...`. Replacing an image removes the old file only
//! after the new one is on disk; that swap is not atomic with the row
//! update, which is acceptable for this domain.

use std::fs;
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const UPLOAD_SUBDIR: &str = "uploads/products";

pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// Strip path separators and anything else that has no business in a
/// filename we are going to write to disk.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Validate and persist an uploaded image. Returns the path to store in
/// the database, relative to the static root.
pub fn save_image(static_dir: &Path, original_name: &str, data: &[u8]) -> Result<String, String> {
    if !allowed_file(original_name) {
        return Err("Invalid file type".to_string());
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err("File too large (max 5 MB)".to_string());
    }

    let dir = static_dir.join(UPLOAD_SUBDIR);
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create upload dir: {}", e))?;

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{}", timestamp, sanitize_filename(original_name));
    fs::write(dir.join(&filename), data).map_err(|e| format!("Failed to save image: {}", e))?;

    Ok(format!("{}/{}", UPLOAD_SUBDIR, filename))
}

/// Best-effort removal of a previously stored image. Only touches the file
/// if the stored path still resolves.
pub fn remove_image(static_dir: &Path, relative_path: &str) {
    let path = static_dir.join(relative_path);
    if path.exists() {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove image {}: {}", path.display(), e);
        }
    }
}
