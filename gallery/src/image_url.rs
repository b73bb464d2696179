use std::sync::OnceLock;

use regex_lite::Regex;

/// e.g. `https://drive.google.com/file/d/FILE_ID/view?usp=sharing`
const DRIVE_FILE_LINK_REGEX: &'static str =
    r"^https?://drive\.google\.com/file/d/([A-Za-z0-9_-]+)";

/// e.g. `https://drive.google.com/open?id=FILE_ID` or
/// `https://drive.google.com/uc?export=view&id=FILE_ID`
const DRIVE_ID_PARAM_LINK_REGEX: &'static str =
    r"^https?://drive\.google\.com/(?:open|uc)\?(?:[^#]*&)?id=([A-Za-z0-9_-]+)";

const DRIVE_CONTENT_URL_PREFIX: &'static str = "https://lh3.googleusercontent.com/d/";

/// Google Drive sharing links point at an HTML viewer page, and Drive doesn't
/// send CORS headers for it, so WebGL can't use them as textures. The
/// googleusercontent form of the same file works.
pub struct ImageUrlNormalizer {
    file_link_regex: Regex,
    id_param_link_regex: Regex,
}

impl ImageUrlNormalizer {
    pub fn new() -> Self {
        Self {
            file_link_regex: Regex::new(DRIVE_FILE_LINK_REGEX).unwrap(),
            id_param_link_regex: Regex::new(DRIVE_ID_PARAM_LINK_REGEX).unwrap(),
        }
    }

    pub fn drive_file_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        let caps = self
            .file_link_regex
            .captures(url)
            .or_else(|| self.id_param_link_regex.captures(url))?;
        caps.get(1).map(|file_id| file_id.as_str())
    }

    /// Returns a URL that can be loaded cross-origin. Anything that isn't a
    /// Drive sharing link is returned unchanged.
    pub fn normalize<T: AsRef<str>>(&self, url: T) -> String {
        let url = url.as_ref();
        match self.drive_file_id(url) {
            Some(file_id) => format!("{DRIVE_CONTENT_URL_PREFIX}{file_id}"),
            None => url.to_string(),
        }
    }
}

/// Only call this when rendering or previewing. Configs always keep the URL the
/// user gave us.
pub fn normalize_image_url<T: AsRef<str>>(url: T) -> String {
    static NORMALIZER: OnceLock<ImageUrlNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(ImageUrlNormalizer::new).normalize(url)
}

#[cfg(test)]
mod tests {
    use crate::image_url::{normalize_image_url, ImageUrlNormalizer};

    #[test]
    fn test_drive_file_id_works() {
        let normalizer = ImageUrlNormalizer::new();
        assert_eq!(
            normalizer.drive_file_id("https://drive.google.com/file/d/1aB-c_D/view?usp=sharing"),
            Some("1aB-c_D")
        );
        assert_eq!(
            normalizer.drive_file_id("https://drive.google.com/open?id=1aB-c_D"),
            Some("1aB-c_D")
        );
        assert_eq!(
            normalizer.drive_file_id("https://drive.google.com/uc?export=view&id=XYZ"),
            Some("XYZ")
        );
        assert_eq!(normalizer.drive_file_id("https://example.com/file/d/XYZ"), None);
    }

    #[test]
    fn test_normalize_image_url_works() {
        assert_eq!(
            normalize_image_url("https://drive.google.com/file/d/1aB-c_D/view?usp=sharing"),
            "https://lh3.googleusercontent.com/d/1aB-c_D"
        );
        assert_eq!(
            normalize_image_url("https://drive.google.com/open?id=1aB-c_D"),
            "https://lh3.googleusercontent.com/d/1aB-c_D"
        );
    }

    #[test]
    fn test_normalize_image_url_pass_through_works() {
        for url in [
            "https://images.unsplash.com/photo-1?auto=format&w=800",
            "https://drive.google.com/drive/folders/abc",
            "",
            "not a url",
        ] {
            assert_eq!(normalize_image_url(url), url);
        }
    }
}
