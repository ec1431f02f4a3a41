use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file and then lets environment
/// variables (prefix `MURMUR__`) override it, falling back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MURMUR")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let step = self.playback.seek_step_percent;
        if !step.is_finite() || step <= 0.0 || step > 100.0 {
            return Err("playback.seek_step_percent must be in (0, 100]".to_string());
        }
        if self.voice.phrase_limit_secs == 0 {
            return Err("voice.phrase_limit_secs must be >= 1".to_string());
        }
        if self.voice.capture_command.is_empty() {
            return Err("voice.capture_command must name a program".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MURMUR_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MURMUR_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/murmur/config.toml`
/// or `~/.config/murmur/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("murmur").join("config.toml"))
}

/// Compute the default log directory under `$XDG_STATE_HOME/murmur` or
/// `~/.local/state/murmur`.
pub fn default_log_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("murmur"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
