//! Config command handler

use std::fs;

use tracing::instrument;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the config command
#[instrument(skip(config, output))]
pub async fn handle_config(
    args: ConfigArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            output.section("Effective Configuration")?;
            output.writeln(&config.to_toml()?)?;
            Ok(())
        }
        ConfigCommands::Path => {
            let path = Config::default_path()
                .ok_or_else(|| Error::config("No configuration directory available"))?;
            output.writeln(&path.display().to_string())?;
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = Config::default_path()
                .ok_or_else(|| Error::config("No configuration directory available"))?;
            if path.exists() && !force {
                return Err(Error::config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, Config::default().to_toml()?)?;
            output.success(&format!("Wrote default configuration to {}", path.display()))?;
            Ok(())
        }
    }
}
