use crate::{config_codec, gallery_config::GalleryConfig};

/// What the app should show when it first loads.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchState {
    pub config: GalleryConfig,

    /// Set when the page was opened from a share link. The gallery is then
    /// shown read-only, without the editor.
    pub embed_mode: bool,
}

impl LaunchState {
    /// Takes the hash portion of the page URL, with or without its leading `#`.
    pub fn from_url_hash<T: AsRef<str>>(hash: T) -> Self {
        let fragment = hash.as_ref().strip_prefix('#').unwrap_or(hash.as_ref());
        if !fragment.is_empty() {
            if let Some(config) = config_codec::decode(fragment) {
                return LaunchState {
                    config,
                    embed_mode: true,
                };
            }
            log::warn!("Invalid or missing configuration, showing defaults.");
        }
        LaunchState {
            config: GalleryConfig::default(),
            embed_mode: false,
        }
    }

    /// Same as `from_url_hash()`, but for a whole URL.
    pub fn from_url<T: AsRef<str>>(url: T) -> Self {
        match url.as_ref().split_once('#') {
            Some((_, hash)) => Self::from_url_hash(hash),
            None => Self::from_url_hash(""),
        }
    }
}

/// Keeps the focused artwork index pointing at an actual artwork, or 0 for
/// an empty gallery.
pub fn clamp_focus_index(index: usize, image_count: usize) -> usize {
    index.min(image_count.saturating_sub(1))
}
