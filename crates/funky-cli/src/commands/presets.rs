//! Preset management commands.

use super::common::{build_params, parse_key_val};
use clap::{Args, Subcommand};
use funky_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_user_presets, preset_name_from_path,
    resolve_preset, user_presets_dir,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory and user presets
    List,

    /// Show the values stored in a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a preset built from another preset and/or parameter overrides
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from
        #[arg(long)]
        from: Option<String>,

        /// Parameter overrides by string id
        #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
        param: Vec<(String, String)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Output file (defaults to the user presets directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list(),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Save {
            name,
            from,
            param,
            description,
            output,
            force,
        } => save(&name, from.as_deref(), &param, description, output, force),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list() -> anyhow::Result<()> {
    println!("Factory Presets\n");
    for preset in factory_presets() {
        println!(
            "  {:<18} {}",
            preset.name,
            preset.description.as_deref().unwrap_or("")
        );
    }

    let user = list_user_presets();
    if !user.is_empty() {
        println!("\nUser Presets\n");
        for path in user {
            let name = preset_name_from_path(&path).unwrap_or_default();
            println!("  {:<18} {}", name, path.display());
        }
    }

    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    println!("{}", preset.name);
    if let Some(description) = &preset.description {
        println!("  {description}");
    }
    println!();
    for (id, value) in &preset.params {
        println!("  {:<18} {}", id, value);
    }
    Ok(())
}

fn save(
    name: &str,
    from: Option<&str>,
    overrides: &[(String, String)],
    description: Option<String>,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let params = build_params(from, overrides)?;
    let mut preset = Preset::from_params(name, &params);
    preset.description = description;

    let path = match output {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(format!("{}.toml", file_stem_for(name))),
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    preset.save(&path)?;
    println!("Saved '{}' to {}", preset.name, path.display());
    Ok(())
}

/// Lowercase file stem with non-alphanumerics replaced by underscores.
fn file_stem_for(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_is_sanitized() {
        assert_eq!(file_stem_for("Classic Funk"), "classic_funk");
        assert_eq!(file_stem_for("1/16 Chop!"), "1_16_chop_");
    }
}
