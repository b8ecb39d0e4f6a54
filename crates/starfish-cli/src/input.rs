//! Loading of palette and config files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use starfish_engine::{EngineConfig, Palette};

/// Read a palette: a JSON array of `[r, g, b]` triples.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read palette file: {}", path.display()))?;
    parse_palette(&content)
        .with_context(|| format!("Failed to parse palette file: {}", path.display()))
}

/// Parse palette JSON.
pub fn parse_palette(json: &str) -> Result<Palette> {
    Ok(serde_json::from_str(json)?)
}

/// Read and validate an engine config file.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    EngineConfig::from_json(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// The given seed, or a fresh random one.
pub fn resolve_seed(seed: Option<u32>) -> u32 {
    seed.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfish_engine::Rgb;

    #[test]
    fn test_parse_palette() {
        let palette = parse_palette("[[255, 0, 0], [0, 128, 255]]").unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::new(255, 0, 0), Rgb::new(0, 128, 255)]
        );
    }

    #[test]
    fn test_parse_palette_rejects_bad_channels() {
        assert!(parse_palette("[[256, 0, 0]]").is_err());
        assert!(parse_palette("[[1, 2]]").is_err());
        assert!(parse_palette("{\"r\": 1}").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_layers": 3, "max_layers": 3}"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.min_layers, 3);
        assert_eq!(config.max_layers, 3);
    }

    #[test]
    fn test_load_config_rejects_invalid_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_layers": 5, "max_layers": 2}"#).unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_palette(Path::new("/nonexistent/palette.json")).unwrap_err();
        assert!(err.to_string().contains("palette.json"));
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }
}
