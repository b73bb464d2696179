use serde::{Deserialize, Serialize};

/// Title given to artworks added through the editor before the user renames them.
pub const NEW_IMAGE_TITLE: &'static str = "New Artwork";

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WallTexture {
    Plaster,
    Concrete,
    Brick,
    Dark,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    Minimal,
    Wood,
    Gold,
    Black,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    /// Unique within a gallery. Used as the key when editing.
    pub id: String,

    /// Whatever the user pasted in. See `image_url::normalize_image_url()` for
    /// the form we actually load.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Width divided by height. Renderers treat a missing value as square.
    #[serde(
        rename = "aspectRatio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub aspect_ratio: Option<f64>,
}

impl GalleryImage {
    pub fn new<T: Into<String>, U: Into<String>>(id: T, url: U) -> Self {
        GalleryImage {
            id: id.into(),
            url: url.into(),
            title: None,
            aspect_ratio: None,
        }
    }
}

/// Everything needed to rebuild a gallery. This is the unit that gets
/// serialized into share links, so field names here are part of the link
/// format and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Left-to-right order along the wall.
    pub images: Vec<GalleryImage>,

    pub spacing: f64,

    pub size: f64,

    #[serde(rename = "wallTexture")]
    pub wall_texture: WallTexture,

    #[serde(rename = "wallColor")]
    pub wall_color: String,

    #[serde(rename = "frameStyle")]
    pub frame_style: FrameStyle,

    #[serde(rename = "spotlightIntensity")]
    pub spotlight_intensity: f64,

    #[serde(rename = "ambientIntensity")]
    pub ambient_intensity: f64,
}

fn sample_image(id: &str, url: &str, aspect_ratio: f64, title: &str) -> GalleryImage {
    GalleryImage {
        id: id.into(),
        url: url.into(),
        title: Some(title.into()),
        aspect_ratio: Some(aspect_ratio),
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            images: vec![
                sample_image(
                    "1",
                    "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?auto=format&fit=crop&w=800&q=80",
                    0.75,
                    "Portrait of Art",
                ),
                sample_image(
                    "2",
                    "https://images.unsplash.com/photo-1547891654-e66ed7ebb968?auto=format&fit=crop&w=800&q=80",
                    1.5,
                    "Abstract Waves",
                ),
                sample_image(
                    "3",
                    "https://images.unsplash.com/photo-1549490349-8643362247b5?auto=format&fit=crop&w=800&q=80",
                    1.33,
                    "The Mountains",
                ),
            ],
            spacing: 2.5,
            size: 1.5,
            wall_texture: WallTexture::Plaster,
            // Pure white so wall textures show their true colors.
            wall_color: "#ffffff".into(),
            frame_style: FrameStyle::Wood,
            spotlight_intensity: 2.5,
            ambient_intensity: 0.5,
        }
    }
}

impl GalleryConfig {
    pub fn image(&self, id: &str) -> Option<&GalleryImage> {
        self.images.iter().find(|image| image.id == id)
    }

    fn image_mut(&mut self, id: &str) -> Option<&mut GalleryImage> {
        self.images.iter_mut().find(|image| image.id == id)
    }

    /// Appends a new square artwork for the given URL and returns its id.
    ///
    /// Empty URLs are ignored, in which case `None` is returned.
    pub fn add_image<T: AsRef<str>>(&mut self, url: T) -> Option<String> {
        let url = url.as_ref();
        if url.is_empty() {
            return None;
        }
        let id = self.fresh_image_id(millis_since_epoch());
        self.images.push(GalleryImage {
            id: id.clone(),
            url: url.into(),
            title: Some(NEW_IMAGE_TITLE.into()),
            aspect_ratio: Some(1.0),
        });
        Some(id)
    }

    /// Returns whether an image was actually removed.
    pub fn remove_image(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        self.images.len() != before
    }

    pub fn set_image_title<T: Into<String>>(&mut self, id: &str, title: T) -> bool {
        let Some(image) = self.image_mut(id) else {
            return false;
        };
        image.title = Some(title.into());
        true
    }

    pub fn set_image_aspect_ratio(&mut self, id: &str, aspect_ratio: f64) -> bool {
        let Some(image) = self.image_mut(id) else {
            return false;
        };
        image.aspect_ratio = Some(aspect_ratio);
        true
    }

    pub fn has_duplicate_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        !self.images.iter().all(|image| seen.insert(image.id.as_str()))
    }

    /// Ids are timestamps, bumped forward until they don't collide with an
    /// existing image.
    fn fresh_image_id(&self, mut candidate: u128) -> String {
        loop {
            let id = candidate.to_string();
            if self.image(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

fn millis_since_epoch() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or_default()
}
