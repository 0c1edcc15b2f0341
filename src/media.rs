//! Image URL normalization for post creation.
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

static DRIVE_FILE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://drive\.google\.com/file/d/([^/?#]+)").unwrap());
static DRIVE_OPEN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://drive\.google\.com/open\?id=([^&#]+)").unwrap());

/// Normalize a user-supplied image URL. Three outcomes:
/// - a local path is rejected with guidance (the API fetches images
///   itself, so it needs a URL it can reach);
/// - a Google Drive share link is rewritten to a direct-download URL;
/// - anything else passes through unchanged.
pub fn normalize_image_url(raw: &str) -> Result<String> {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        bail!(
            "'{raw}' looks like a local file path, not a URL. Upload the image \
             somewhere fetchable (e.g. Google Drive with link sharing enabled) \
             and pass the shareable URL instead."
        );
    }

    let drive_id = DRIVE_FILE_LINK
        .captures(raw)
        .or_else(|| DRIVE_OPEN_LINK.captures(raw))
        .and_then(|caps| caps.get(1));
    if let Some(id) = drive_id {
        let direct = format!(
            "https://drive.google.com/uc?export=download&id={}",
            id.as_str()
        );
        info!("rewrote Google Drive share link to {direct}");
        return Ok(direct);
    }

    Ok(raw.to_string())
}
