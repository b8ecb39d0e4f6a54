//! CLI argument definitions for the Starfish command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Starfish - Seamless Tileable Texture Generator
#[derive(Parser)]
#[command(name = "starfish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a random layered texture to a PNG file
    Render {
        /// Texture width in pixels
        #[arg(long, default_value = "256")]
        width: u32,

        /// Texture height in pixels
        #[arg(long, default_value = "256")]
        height: u32,

        /// Seed (default: a fresh random seed, printed so the run can be repeated)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Palette file: a JSON array of [r, g, b] triples
        #[arg(short, long)]
        palette: Option<String>,

        /// Engine config file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Swap diagonal quadrants so the wrap seam lands in the middle
        #[arg(long)]
        swap_corners: bool,

        /// Render N textures with seeds derived from the base seed (writes <output>-<i>.png)
        #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Output PNG path
        #[arg(short, long)]
        output: String,
    },

    /// Render one generator as a greyscale PNG
    Layer {
        /// Generator index (see `starfish generators`)
        #[arg(short, long)]
        generator: usize,

        /// Layer width in pixels
        #[arg(long, default_value = "256")]
        width: u32,

        /// Layer height in pixels
        #[arg(long, default_value = "256")]
        height: u32,

        /// Seed (default: a fresh random seed)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Keep the generator's own origin instead of rolling it
        #[arg(long)]
        no_roll: bool,

        /// Index into the full table, experimental generators included
        #[arg(long)]
        all_generators: bool,

        /// Render through the compositor as an opaque single-layer texture
        #[arg(long)]
        color: bool,

        /// Output PNG path
        #[arg(short, long)]
        output: String,
    },

    /// List the generator table
    Generators {
        /// Include experimental generators
        #[arg(long)]
        all: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
