//! Finding and reading the config file.

use std::path::PathBuf;

use intro3d_core::{ConfigError, config::DemoConfig};

/// Where the config came from.
pub enum Source {
    Defaults,
    File(PathBuf),
    Failed(PathBuf, ConfigError),
}

/// `$INTRO3D_CONFIG`, or `intro3d/config.json` in the user's config directory.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("INTRO3D_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("intro3d").join("config.json"))
}

/// Reads the config file if there is one. Any problem falls back to defaults.
pub fn load() -> (DemoConfig, Source) {
    let Some(path) = config_path() else {
        return (DemoConfig::default(), Source::Defaults);
    };
    if !path.exists() {
        return (DemoConfig::default(), Source::Defaults);
    }

    match DemoConfig::load(&path) {
        Ok(config) => (config, Source::File(path)),
        Err(err) => (DemoConfig::default(), Source::Failed(path, err)),
    }
}
