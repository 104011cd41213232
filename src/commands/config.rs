//! Config subcommands handler

use anyhow::{bail, Result};
use std::path::Path;

use pipelog::Config;

use super::{config_file, load_config};

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", render(&config)?);
    Ok(())
}

/// Print the location of the config file in effect.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", config_file(config_path)?.display());
    Ok(())
}

/// Write the default configuration file.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_file(config_path)?;
    init_at(&path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub(crate) fn render(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

pub(crate) fn init_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            path.display()
        );
    }
    Config::default().save_to(path)
}
