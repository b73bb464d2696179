//! The link format used before share links were compressed: the JSON record,
//! percent-encoded the way `encodeURIComponent` does it, then base64-encoded.
//!
//! We only ever need to read these, but writing them is handy for checking
//! that old links still work.

use anyhow::{anyhow, Result};
use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine as _,
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::gallery_config::GalleryConfig;

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Accepts what the browser's `atob()` accepts, which doesn't insist on padding.
const FORGIVING_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// The first character of any serialized record.
pub const RECORD_OPENING_MARKER: char = '{';

pub fn encode(config: &GalleryConfig) -> Result<String> {
    let json = serde_json::to_string(config)?;
    Ok(encode_text(&json))
}

pub fn encode_text<T: AsRef<str>>(text: T) -> String {
    let escaped = utf8_percent_encode(text.as_ref(), URI_COMPONENT).to_string();
    STANDARD.encode(escaped)
}

/// Decodes a legacy fragment back into text, without checking what the text is.
///
/// Each decoded byte becomes one character, the way `atob()` works, and only
/// the percent escapes are read as UTF-8.
pub fn decode_text<T: AsRef<str>>(fragment: T) -> Result<String> {
    let compact: String = fragment
        .as_ref()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = FORGIVING_BASE64.decode(compact)?;
    let escaped: String = bytes.iter().map(|&b| char::from(b)).collect();
    check_percent_escapes(&escaped)?;
    let text = percent_decode_str(&escaped).decode_utf8()?;
    Ok(text.into_owned())
}

/// Every `%` has to start a two-digit hex escape, or `decodeURIComponent`
/// throws.
fn check_percent_escapes(text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    for (index, _) in text.match_indices('%') {
        match bytes.get(index + 1..index + 3) {
            Some(digits) if digits.iter().all(u8::is_ascii_hexdigit) => {}
            _ => return Err(anyhow!("Malformed percent escape at offset {index}")),
        }
    }
    Ok(())
}

/// Like `decode_text()`, but only returns text that looks like a serialized
/// record. Plenty of garbage happens to be valid base64.
pub fn decode_record_text<T: AsRef<str>>(fragment: T) -> Result<String> {
    let text = decode_text(fragment)?;
    if !text.starts_with(RECORD_OPENING_MARKER) {
        return Err(anyhow!("Decoded text does not look like a record"));
    }
    Ok(text)
}
