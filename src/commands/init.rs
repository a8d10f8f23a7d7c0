use crate::args::InitArgs;
use crate::commands::Out;
use crate::settings::Settings;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and an initial `config.json`.
///
/// # Arguments
/// - `finsight_home` - The directory that will hold the config and ledger files, e.g.
///   `$HOME/finsight`
/// - `args` - Optional initial settings. Anything not given gets its default.
///
/// # Errors
/// - Returns an error if the home directory already holds a config file or if any file operation
///   fails.
pub async fn init(finsight_home: &Path, args: InitArgs) -> Result<Out<Settings>> {
    let mut settings = Settings::default();
    if let Some(display_name) = args.display_name {
        settings.display_name = display_name;
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
    }

    let config = Config::create(finsight_home, settings.clone())
        .await
        .context("Unable to create the home directory and config")?;
    Ok(Out::new(
        format!(
            "Created the finsight home directory at {}",
            config.root().display()
        ),
        settings,
    ))
}
