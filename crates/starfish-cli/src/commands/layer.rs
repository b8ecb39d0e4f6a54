//! Layer command implementation
//!
//! Renders a single generator through the sampling engine, as greyscale PNG
//! or as the opaque single-layer test texture.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use starfish_engine::png::{
    write_grey_to_vec_with_hash, write_pixels_to_vec_with_hash, PngConfig,
};
use starfish_engine::{DeterministicRng, EngineConfig, GeneratorSet, Layer, Registry, Texture};

use crate::input::resolve_seed;

/// Arguments for the layer command.
#[derive(Debug, Clone)]
pub struct LayerArgs<'a> {
    pub generator: usize,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u32>,
    pub roll: bool,
    pub all_generators: bool,
    pub color: bool,
    pub output: &'a str,
}

/// Run the layer command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(args: &LayerArgs) -> Result<ExitCode> {
    let seed = resolve_seed(args.seed);
    let set = if args.all_generators {
        GeneratorSet::All
    } else {
        GeneratorSet::Production
    };
    let registry = Registry::load_set(set);
    let name = generator_name(&registry, args.generator)?;
    println!(
        "{} {} {}x{} (seed {})",
        "Rendering:".cyan().bold(),
        name,
        args.width,
        args.height,
        seed
    );

    let mut rng = DeterministicRng::new(seed);
    let encoded = if args.color {
        let config = EngineConfig {
            roll_texture: args.roll,
            ..EngineConfig::default()
        };
        let texture = Texture::single_layer(
            &registry,
            args.generator,
            args.width,
            args.height,
            &config,
            &mut rng,
        )
        .context("Failed to create texture")?;
        write_pixels_to_vec_with_hash(&texture.render(), &PngConfig::default().without_alpha())
    } else {
        let layer = Layer::new(
            &registry,
            args.generator,
            args.width,
            args.height,
            args.roll,
            &mut rng,
        )
        .context("Failed to create layer")?;
        write_grey_to_vec_with_hash(&layer.render(), &PngConfig::default())
    };
    let (bytes, hash) = encoded.context("Failed to encode PNG")?;

    fs::write(args.output, &bytes)
        .with_context(|| format!("Failed to write to: {}", args.output))?;

    println!(
        "{} Wrote {} ({})",
        "SUCCESS".green().bold(),
        args.output,
        &hash[..16]
    );
    Ok(ExitCode::SUCCESS)
}

/// Name of generator `index`, or an error naming the table size.
fn generator_name(registry: &Registry, index: usize) -> Result<&'static str> {
    registry.get(index).map(|g| g.name()).with_context(|| {
        format!(
            "Unknown generator index {} (table has {}; see `starfish generators`)",
            index,
            registry.count()
        )
    })
}
