//! Generators command implementation
//!
//! Lists the generator table with each entry's capabilities.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use std::process::ExitCode;

use starfish_engine::{GeneratorSet, Registry};

/// Run the generators command
///
/// # Arguments
/// * `all` - Include experimental generators
/// * `json_output` - Print JSON instead of a table
pub fn run(all: bool, json_output: bool) -> Result<ExitCode> {
    let set = if all {
        GeneratorSet::All
    } else {
        GeneratorSet::Production
    };
    let registry = Registry::load_set(set);

    if json_output {
        let output = serde_json::to_string_pretty(&table(&registry))
            .context("Failed to serialize generator table")?;
        println!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Generators".cyan().bold());
    for (index, generator) in registry.iter().enumerate() {
        let caps = generator.capabilities();
        let mut flags = Vec::new();
        if caps.anti_aliased {
            flags.push("anti-aliased");
        }
        if caps.seamless {
            flags.push("seamless");
        }
        println!(
            "  {:>2}  {:<12} {}",
            index,
            generator.name().bold(),
            flags.join(", ").dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn table(registry: &Registry) -> Value {
    Value::Array(
        registry
            .iter()
            .enumerate()
            .map(|(index, generator)| {
                let caps = generator.capabilities();
                json!({
                    "index": index,
                    "name": generator.name(),
                    "anti_aliased": caps.anti_aliased,
                    "seamless": caps.seamless,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_generator() {
        let registry = Registry::load();
        let table = table(&registry);
        let entries = table.as_array().unwrap();
        assert_eq!(entries.len(), registry.count());
        assert_eq!(entries[0]["index"], 0);
        assert_eq!(entries[0]["name"], "coswave");
    }

    #[test]
    fn test_all_adds_experimental() {
        let production = table(&Registry::load_set(GeneratorSet::Production));
        let all = table(&Registry::load_set(GeneratorSet::All));
        assert!(all.as_array().unwrap().len() > production.as_array().unwrap().len());
    }
}
