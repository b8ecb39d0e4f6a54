//! Starfish CLI - renders seamless tileable textures
//!
//! This binary provides commands for rendering full textures, previewing
//! single generators, and listing the generator table.

use clap::Parser;
use std::process::ExitCode;

use starfish_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            width,
            height,
            seed,
            palette,
            config,
            swap_corners,
            count,
            output,
        } => commands::render::run(&commands::render::RenderArgs {
            width,
            height,
            seed,
            palette: palette.as_deref(),
            config: config.as_deref(),
            swap_corners,
            count,
            output: &output,
        }),
        Commands::Layer {
            generator,
            width,
            height,
            seed,
            no_roll,
            all_generators,
            color,
            output,
        } => commands::layer::run(&commands::layer::LayerArgs {
            generator,
            width,
            height,
            seed,
            roll: !no_roll,
            all_generators,
            color,
            output: &output,
        }),
        Commands::Generators { all, json } => commands::generators::run(all, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "starfish",
            "render",
            "--width",
            "64",
            "--height",
            "32",
            "--seed",
            "7",
            "--output",
            "out.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                width,
                height,
                seed,
                palette,
                config,
                swap_corners,
                count,
                output,
            } => {
                assert_eq!((width, height), (64, 32));
                assert_eq!(count, 1);
                assert_eq!(seed, Some(7));
                assert!(palette.is_none());
                assert!(config.is_none());
                assert!(!swap_corners);
                assert_eq!(output, "out.png");
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_render_defaults() {
        let cli = Cli::try_parse_from(["starfish", "render", "-o", "out.png"]).unwrap();
        match cli.command {
            Commands::Render {
                width,
                height,
                seed,
                ..
            } => {
                assert_eq!((width, height), (256, 256));
                assert!(seed.is_none());
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_requires_output_for_render() {
        let err = Cli::try_parse_from(["starfish", "render", "--seed", "1"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_cli_rejects_zero_count() {
        assert!(Cli::try_parse_from(["starfish", "render", "-n", "0", "-o", "out.png"]).is_err());
    }

    #[test]
    fn test_cli_parses_layer() {
        let cli = Cli::try_parse_from([
            "starfish",
            "layer",
            "--generator",
            "3",
            "--no-roll",
            "--all-generators",
            "--output",
            "layer.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Layer {
                generator,
                no_roll,
                all_generators,
                color,
                output,
                ..
            } => {
                assert_eq!(generator, 3);
                assert!(no_roll);
                assert!(all_generators);
                assert!(!color);
                assert_eq!(output, "layer.png");
            }
            _ => panic!("expected layer command"),
        }
    }

    #[test]
    fn test_cli_rejects_negative_seed() {
        assert!(Cli::try_parse_from([
            "starfish", "render", "--seed", "-1", "--output", "o.png"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parses_generators() {
        let cli = Cli::try_parse_from(["starfish", "generators", "--all", "--json"]).unwrap();
        match cli.command {
            Commands::Generators { all, json } => {
                assert!(all);
                assert!(json);
            }
            _ => panic!("expected generators command"),
        }
    }
}
