//! Converts gallery configs to and from the text after the `#` in share links.
//!
//! There's no version tag in the fragment. Instead we try the current
//! (compressed) scheme first, and fall back to the legacy base64 scheme only
//! if decompression produces no text at all. That order must never change, or
//! current links could get misread as legacy ones.
//!
//! Neither function ever fails loudly: encoding yields an empty string and
//! decoding yields `None`, and callers decide what to tell the user.

use anyhow::{anyhow, Result};

use crate::{
    gallery_config::GalleryConfig,
    legacy_codec,
    lz_string::{compress_to_encoded_uri_component, decompress_from_encoded_uri_component},
};

/// Returns an empty string if the config can't be serialized, which callers
/// should treat as "nothing to share".
pub fn encode(config: &GalleryConfig) -> String {
    match try_to_encode(config) {
        Ok(fragment) => fragment,
        Err(err) => {
            log::error!("Failed to serialize config: {err}");
            String::new()
        }
    }
}

fn try_to_encode(config: &GalleryConfig) -> Result<String> {
    let json = serde_json::to_string(config)?;
    Ok(compress_to_encoded_uri_component(json))
}

/// Returns `None` for empty, corrupt, or foreign fragments.
///
/// Field values aren't range-checked; a negative spacing comes back as-is.
pub fn decode<T: AsRef<str>>(fragment: T) -> Option<GalleryConfig> {
    let fragment = fragment.as_ref();
    if fragment.is_empty() {
        return None;
    }
    let json = match decompress_from_encoded_uri_component(fragment) {
        Some(json) if !json.is_empty() => json,
        _ => match legacy_codec::decode_record_text(fragment) {
            Ok(json) => {
                log::debug!("Decoded fragment using the legacy scheme.");
                json
            }
            Err(err) => {
                log::debug!("Fragment isn't a legacy link either: {err}");
                return None;
            }
        },
    };
    match parse_config(&json) {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}

fn parse_config(json: &str) -> Result<GalleryConfig> {
    match serde_json::from_str(json) {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to parse config: {}", err)),
    }
}
