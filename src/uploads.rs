//! Offer-letter files under `<media_root>/offer_letters/`.

use crate::errors::PlacementError;
use rand::Rng;
use std::path::{Path, PathBuf};

pub const OFFER_LETTER_DIR: &str = "offer_letters";
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "png", "jpg", "jpeg"];

/// Largest accepted offer letter.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Split a client file name into a safe stem and its lowercased extension.
///
/// Path components are dropped and anything outside `[A-Za-z0-9_-]` in the
/// stem becomes `_`.
pub fn sanitize_file_name(original: &str) -> Result<(String, String), PlacementError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let (stem, ext) = base
        .rsplit_once('.')
        .ok_or_else(|| PlacementError::Upload(format!("`{base}` has no file extension")))?;
    let ext = ext.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(PlacementError::Upload(format!(
            "`.{ext}` files are not accepted; use one of {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let mut clean: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(80)
        .collect();
    if clean.trim_matches('_').is_empty() {
        clean = "offer_letter".to_string();
    }

    Ok((clean, ext))
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz23456789";
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Write an uploaded offer letter and return its path relative to the media root.
pub async fn store_offer_letter(
    media_root: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, PlacementError> {
    if bytes.is_empty() {
        return Err(PlacementError::Upload("the uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(PlacementError::Upload(format!(
            "the uploaded file is larger than {} MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let (stem, ext) = sanitize_file_name(original_name)?;
    let dir = media_root.join(OFFER_LETTER_DIR);
    tokio::fs::create_dir_all(&dir).await?;

    let mut name = format!("{stem}.{ext}");
    while tokio::fs::try_exists(dir.join(&name)).await? {
        name = format!("{stem}_{}.{ext}", random_suffix());
    }

    tokio::fs::write(dir.join(&name), bytes).await?;
    tracing::info!(file = %name, size = bytes.len(), "offer letter stored");

    Ok(format!("{OFFER_LETTER_DIR}/{name}"))
}

/// Absolute location of a stored relative path, refusing anything that
/// escapes the offer-letter directory.
pub fn resolve(media_root: &Path, relative: &str) -> Option<PathBuf> {
    let name = relative.strip_prefix(OFFER_LETTER_DIR)?.strip_prefix('/')?;
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return None;
    }
    Some(media_root.join(OFFER_LETTER_DIR).join(name))
}

/// Remove a previously stored file. Failures are logged, not returned.
pub async fn remove_offer_letter(media_root: &Path, relative: &str) {
    let Some(path) = resolve(media_root, relative) else {
        tracing::warn!(path = relative, "refusing to remove file outside offer letters");
        return;
    };
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove offer letter");
    }
}
