use crate::{config_codec, gallery_config::GalleryConfig};

/// Some embedding hosts (Google Sites, notably) truncate or reject URLs
/// longer than this.
pub const MAX_SHARE_LINK_LEN: usize = 2000;

const EMBED_WIDTH: &'static str = "100%";

const EMBED_HEIGHT: &'static str = "600px";

const EMBED_ALLOW: &'static str = "fullscreen; accelerometer; gyroscope; magnetometer;";

const LOCAL_HOSTNAMES: [&'static str; 2] = ["localhost", "127.0.0.1"];

pub fn share_link<T: AsRef<str>>(config: &GalleryConfig, base_url: T) -> String {
    link_for_fragment(base_url.as_ref(), &config_codec::encode(config))
}

fn link_for_fragment(base_url: &str, fragment: &str) -> String {
    format!("{base_url}#{fragment}")
}

/// Wraps the share link in iframe markup. If the config couldn't be encoded,
/// the markup is still well-formed, it just points at the bare app.
pub fn generate_embed_code<T: AsRef<str>>(config: &GalleryConfig, base_url: T) -> String {
    embed_code_for_link(&share_link(config, base_url))
}

fn embed_code_for_link(link: &str) -> String {
    format!(
        r#"<iframe src="{link}" width="{EMBED_WIDTH}" height="{EMBED_HEIGHT}" frameborder="0" allow="{EMBED_ALLOW}"></iframe>"#
    )
}

pub fn is_share_link_too_long<T: AsRef<str>>(link: T) -> bool {
    link.as_ref().chars().count() > MAX_SHARE_LINK_LEN
}

/// Whether the app is being served from this machine, in which case nobody
/// else will be able to load the embed.
pub fn is_local_base_url<T: AsRef<str>>(base_url: T) -> bool {
    match hostname(base_url.as_ref()) {
        Some(hostname) => LOCAL_HOSTNAMES.iter().any(|local| *local == hostname),
        None => false,
    }
}

fn hostname(url: &str) -> Option<&str> {
    let (_scheme, rest) = url.split_once("://")?;
    let authority = rest.split(|c: char| c == '/' || c == '?' || c == '#').next()?;
    let host_and_port = authority.rsplit('@').next()?;
    host_and_port.split(':').next()
}

/// Everything the embed dialog shows for a config.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareOutput {
    pub link: String,
    pub embed_code: String,
    pub too_long: bool,
    pub local_base_url: bool,
}

impl ShareOutput {
    pub fn new<T: AsRef<str>>(config: &GalleryConfig, base_url: T) -> Self {
        let base_url = base_url.as_ref();
        let link = link_for_fragment(base_url, &config_codec::encode(config));
        ShareOutput {
            embed_code: embed_code_for_link(&link),
            too_long: is_share_link_too_long(&link),
            local_base_url: is_local_base_url(base_url),
            link,
        }
    }

    pub fn link_len(&self) -> usize {
        self.link.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config_codec,
        gallery_config::{GalleryConfig, GalleryImage},
        share_link::{
            embed_code_for_link, generate_embed_code, is_local_base_url, is_share_link_too_long,
            share_link, ShareOutput, MAX_SHARE_LINK_LEN,
        },
    };

    const BASE_URL: &'static str = "https://lumina.example.com/";

    fn config_with_images(count: u64) -> GalleryConfig {
        let mut config = GalleryConfig::default();
        config.images = (0..count)
            .map(|i| GalleryImage {
                id: i.to_string(),
                url: format!(
                    "https://cdn.example.org/u/{:x}/{:x}.jpg",
                    (i * 2654435761) % 4294967291,
                    ((i + 1) * 40503 * 97) % 1000003
                ),
                title: None,
                aspect_ratio: Some(1.5),
            })
            .collect();
        config
    }

    #[test]
    fn test_share_link_works() {
        let config = GalleryConfig::default();
        let link = share_link(&config, BASE_URL);
        let (base, fragment) = link.split_once('#').unwrap();
        assert_eq!(base, BASE_URL);
        assert_eq!(config_codec::decode(fragment), Some(config));
    }

    #[test]
    fn test_generate_embed_code_works() {
        let config = GalleryConfig::default();
        let fragment = config_codec::encode(&config);
        assert_eq!(
            generate_embed_code(&config, BASE_URL),
            format!(
                r#"<iframe src="https://lumina.example.com/#{fragment}" width="100%" height="600px" frameborder="0" allow="fullscreen; accelerometer; gyroscope; magnetometer;"></iframe>"#
            )
        );
    }

    #[test]
    fn test_embed_code_for_empty_fragment_works() {
        assert_eq!(
            embed_code_for_link("https://a.b/#"),
            r#"<iframe src="https://a.b/#" width="100%" height="600px" frameborder="0" allow="fullscreen; accelerometer; gyroscope; magnetometer;"></iframe>"#
        );
    }

    #[test]
    fn test_is_share_link_too_long_works() {
        assert!(!is_share_link_too_long("x".repeat(MAX_SHARE_LINK_LEN)));
        assert!(is_share_link_too_long("x".repeat(MAX_SHARE_LINK_LEN + 1)));
    }

    #[test]
    fn test_large_gallery_length_warning_works() {
        let small = ShareOutput::new(&GalleryConfig::default(), BASE_URL);
        assert!(!small.too_long);

        let medium = ShareOutput::new(&config_with_images(40), BASE_URL);
        assert_eq!(config_codec::encode(&config_with_images(40)).len(), 1712);
        assert_eq!(medium.link_len(), 1740);
        assert!(!medium.too_long);

        let large = ShareOutput::new(&config_with_images(60), BASE_URL);
        assert_eq!(config_codec::encode(&config_with_images(60)).len(), 2249);
        assert_eq!(large.link_len(), 2277);
        assert!(large.too_long);
        assert_eq!(
            config_codec::decode(large.link.split_once('#').unwrap().1),
            Some(config_with_images(60))
        );
    }

    #[test]
    fn test_is_local_base_url_works() {
        assert!(is_local_base_url("http://localhost:5173/"));
        assert!(is_local_base_url("http://127.0.0.1/gallery"));
        assert!(is_local_base_url("http://user@localhost"));
        assert!(!is_local_base_url("https://lumina.example.com/"));
        assert!(!is_local_base_url("https://localhost.example.com/"));
        assert!(!is_local_base_url("localhost"));
    }

    #[test]
    fn test_share_output_works() {
        let output = ShareOutput::new(&GalleryConfig::default(), "http://localhost:3000/");
        assert!(output.local_base_url);
        assert!(output.embed_code.contains(&output.link));
    }
}
