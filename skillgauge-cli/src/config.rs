use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use skillgauge_core::ScoringConfig;

/// Platform user config path, e.g. `~/.config/skillgauge/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skillgauge").join("config.toml"))
}

/// Load the explicit config file, else the user config, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<ScoringConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        tracing::debug!(path = %path.display(), "Loading scoring config");
        return ScoringConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match user_config_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading user scoring config");
            ScoringConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => Ok(ScoringConfig::default()),
    }
}
