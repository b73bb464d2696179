pub mod config_codec;
pub mod gallery_config;
pub mod image_url;
pub mod launch_state;
pub mod legacy_codec;
pub mod lz_string;
pub mod share_link;
