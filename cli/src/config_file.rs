use std::path::PathBuf;

use anyhow::{anyhow, Result};
use gallery::gallery_config::GalleryConfig;

/// Loads a gallery config from a JSON file, or the sample gallery if no file
/// is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<GalleryConfig> {
    let Some(path) = path else {
        return Ok(GalleryConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: GalleryConfig = match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(err) => return Err(anyhow!("Failed to load {}: {}", path.display(), err)),
    };
    if config.has_duplicate_ids() {
        log::warn!("{} contains images with duplicate ids.", path.display());
    }
    Ok(config)
}

/// Writes pretty-printed JSON to the given file, or stdout if there isn't one.
pub fn write_config(config: &GalleryConfig, path: Option<&PathBuf>) -> Result<()> {
    let pretty_printed = serde_json::to_string_pretty(config)?;
    match path {
        Some(path) => {
            println!("Writing {}.", path.display());
            std::fs::write(path, pretty_printed)?;
        }
        None => println!("{pretty_printed}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config_file::{load_config, write_config};
    use gallery::gallery_config::GalleryConfig;

    #[test]
    fn test_load_config_defaults_works() {
        assert_eq!(load_config(None).unwrap(), GalleryConfig::default());
    }

    #[test]
    fn test_config_file_round_trip_works() {
        let path = std::env::temp_dir().join(format!("gallery-config-{}.json", std::process::id()));
        let mut config = GalleryConfig::default();
        config.images.truncate(2);
        config.wall_color = "#e5e5e5".into();
        write_config(&config, Some(&path)).unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_bad_json_works() {
        let path = std::env::temp_dir().join(format!("gallery-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"images": []}"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(err.to_string().starts_with("Failed to load"));
    }
}
