//! Render command implementation
//!
//! Builds random textures from a seed and writes them as PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use starfish_engine::png::{write_pixels_to_vec_with_hash, PngConfig};
use starfish_engine::{DeterministicRng, EngineConfig, PixelBuffer, Texture};

use crate::input::{load_config, load_palette, resolve_seed};

/// Arguments for the render command.
#[derive(Debug, Clone)]
pub struct RenderArgs<'a> {
    pub width: u32,
    pub height: u32,
    pub seed: Option<u32>,
    pub palette: Option<&'a str>,
    pub config: Option<&'a str>,
    pub swap_corners: bool,
    pub count: u32,
    pub output: &'a str,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &RenderArgs) -> Result<ExitCode> {
    let base_seed = resolve_seed(args.seed);

    for index in 0..args.count {
        let (seed, path) = if args.count == 1 {
            (base_seed, PathBuf::from(args.output))
        } else {
            (
                DeterministicRng::derive_seed(base_seed, index),
                batch_path(Path::new(args.output), index),
            )
        };
        println!(
            "{} {}x{} (seed {})",
            "Rendering:".cyan().bold(),
            args.width,
            args.height,
            seed
        );

        let (bytes, hash) = render(args, seed)?;
        fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write to: {}", path.display()))?;

        println!(
            "{} Wrote {} ({})",
            "SUCCESS".green().bold(),
            path.display(),
            &hash[..16]
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// `out.png` -> `out-3.png`.
fn batch_path(output: &Path, index: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    output.with_file_name(name)
}

/// Render to encoded PNG bytes and their BLAKE3 hash.
fn render(args: &RenderArgs, seed: u32) -> Result<(Vec<u8>, String)> {
    let config = match args.config {
        Some(path) => load_config(Path::new(path))?,
        None => EngineConfig::default(),
    };
    let palette = args.palette.map(|p| load_palette(Path::new(p))).transpose()?;
    if let Some(palette) = &palette {
        if palette.len() < 2 {
            log::warn!(
                "palette has {} colour(s); drawing random colours instead",
                palette.len()
            );
        }
    }

    let mut rng = DeterministicRng::new(seed);
    let texture = Texture::new(args.width, args.height, palette.as_ref(), &config, &mut rng)
        .context("Failed to create texture")?;
    let mut pixels: PixelBuffer = texture.render();
    drop(texture);

    if args.swap_corners {
        pixels.swap_corners();
    }

    let encoded = write_pixels_to_vec_with_hash(&pixels, &PngConfig::default())
        .context("Failed to encode PNG")?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: &str) -> RenderArgs<'_> {
        RenderArgs {
            width: 24,
            height: 16,
            seed: Some(11),
            palette: None,
            config: None,
            swap_corners: false,
            count: 1,
            output,
        }
    }

    #[test]
    fn test_render_is_reproducible() {
        let (a, hash_a) = render(&args("unused.png"), 11).unwrap();
        let (b, hash_b) = render(&args("unused.png"), 11).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_a, hash_b);
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texture.png");
        let output = path.to_str().unwrap();
        run(&args(output)).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_batch_writes_derived_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.png");
        let output = path.to_str().unwrap();
        run(&RenderArgs {
            count: 3,
            ..args(output)
        })
        .unwrap();

        assert!(!path.exists());
        let first = fs::read(dir.path().join("batch-0.png")).unwrap();
        let third = fs::read(dir.path().join("batch-2.png")).unwrap();
        assert_ne!(first, third);

        let expected = render(&args(output), DeterministicRng::derive_seed(11, 2))
            .unwrap()
            .0;
        assert_eq!(third, expected);
    }

    #[test]
    fn test_batch_path() {
        assert_eq!(
            batch_path(Path::new("dir/out.png"), 4),
            PathBuf::from("dir/out-4.png")
        );
        assert_eq!(batch_path(Path::new("out"), 0), PathBuf::from("out-0"));
    }

    #[test]
    fn test_swap_corners_changes_output() {
        let plain = render(&args("unused.png"), 5).unwrap().0;
        let swapped = render(
            &RenderArgs {
                swap_corners: true,
                ..args("unused.png")
            },
            5,
        )
        .unwrap()
        .0;
        assert_ne!(plain, swapped);
    }

    #[test]
    fn test_zero_size_fails() {
        let bad = RenderArgs {
            width: 0,
            ..args("unused.png")
        };
        assert!(render(&bad, 1).is_err());
    }

    #[test]
    fn test_palette_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let palette = dir.path().join("palette.json");
        fs::write(&palette, "[[255, 0, 0], [0, 0, 255]]").unwrap();
        let with_palette = RenderArgs {
            palette: palette.to_str(),
            ..args("unused.png")
        };
        let (a, _) = render(&with_palette, 3).unwrap();
        let (b, _) = render(&args("unused.png"), 3).unwrap();
        assert_ne!(a, b);
    }
}
