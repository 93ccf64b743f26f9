//! Screen Configuration
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. TOML config file (`~/.config/herodeck/config.toml` or an explicit path)
//! 3. `HERODECK_*` environment variables
//! 4. [`ConfigOverrides`] from the command line
//!
//! ```toml
//! [screen]
//! intro_source = "assets/intro.mp4"
//! click_sound = "assets/sf.mp3"
//! roster_base_url = "https://api.opendota.com/api"
//! request_timeout_secs = 30
//! intro_timeout_secs = 15
//! stale_responses = "latest_request_wins"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::capabilities::{AssetSource, DEFAULT_BASE_URL};
use crate::error::ConfigError;
use crate::query::StaleResponsePolicy;

/// Default intro video
pub const DEFAULT_INTRO_SOURCE: &str = "assets/intro.mp4";
/// Default click cue
pub const DEFAULT_CLICK_SOUND: &str = "assets/sf.mp3";
/// Default per-request timeout for roster calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default surface message buffer
pub const DEFAULT_MESSAGE_BUFFER: usize = 100;

/// Resolved screen configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenConfig {
    /// Intro media
    pub intro_source: AssetSource,
    /// Click cue
    pub click_sound: AssetSource,
    /// Roster service base URL
    pub roster_base_url: String,
    /// Per-request timeout for roster calls
    pub request_timeout: Duration,
    /// Give up waiting for the intro after this long (`None` waits forever)
    pub intro_timeout: Option<Duration>,
    /// How overlapping lookups resolve
    pub stale_responses: StaleResponsePolicy,
    /// Buffer size of the screen-to-surface channel
    pub message_buffer: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            intro_source: AssetSource::parse(DEFAULT_INTRO_SOURCE),
            click_sound: AssetSource::parse(DEFAULT_CLICK_SOUND),
            roster_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            intro_timeout: None,
            stale_responses: StaleResponsePolicy::default(),
            message_buffer: DEFAULT_MESSAGE_BUFFER,
        }
    }
}

impl ScreenConfig {
    /// Defaults overlaid with process environment
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay `HERODECK_*` variables read through `lookup`
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("HERODECK_INTRO") {
            self.intro_source = AssetSource::parse(v);
        }
        if let Some(v) = lookup("HERODECK_CLICK_SOUND") {
            self.click_sound = AssetSource::parse(v);
        }
        if let Some(v) = lookup("HERODECK_ROSTER_URL") {
            self.roster_base_url = v;
        }
        if let Some(secs) = parse_env(&lookup, "HERODECK_REQUEST_TIMEOUT_SECS") {
            if secs > 0 {
                self.request_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(secs) = parse_env::<u64>(&lookup, "HERODECK_INTRO_TIMEOUT_SECS") {
            self.intro_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(policy) = parse_env(&lookup, "HERODECK_STALE_RESPONSES") {
            self.stale_responses = policy;
        }
        if let Some(size) = parse_env::<usize>(&lookup, "HERODECK_MESSAGE_BUFFER") {
            self.message_buffer = size.max(1);
        }
    }

    /// Overlay the `[screen]` table of a config file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero request timeout or buffer.
    pub fn apply_file(&mut self, file: &ScreenToml) -> Result<(), ConfigError> {
        if let Some(v) = &file.intro_source {
            self.intro_source = AssetSource::parse(v.clone());
        }
        if let Some(v) = &file.click_sound {
            self.click_sound = AssetSource::parse(v.clone());
        }
        if let Some(v) = &file.roster_base_url {
            self.roster_base_url.clone_from(v);
        }
        if let Some(secs) = file.request_timeout_secs {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "request_timeout_secs".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.intro_timeout_secs {
            self.intro_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(policy) = file.stale_responses {
            self.stale_responses = policy;
        }
        if let Some(size) = file.message_buffer {
            if size == 0 {
                return Err(ConfigError::Invalid {
                    key: "message_buffer".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            self.message_buffer = size;
        }
        Ok(())
    }

    /// Overlay command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = &overrides.intro_source {
            self.intro_source = AssetSource::parse(v.clone());
        }
        if let Some(v) = &overrides.click_sound {
            self.click_sound = AssetSource::parse(v.clone());
        }
        if let Some(v) = &overrides.roster_base_url {
            self.roster_base_url.clone_from(v);
        }
        if let Some(secs) = overrides.intro_timeout_secs {
            self.intro_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(policy) = overrides.stale_responses {
            self.stale_responses = policy;
        }
    }
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key = key, value = %raw, "Ignoring invalid environment value");
            None
        }
    }
}

/// On-disk config file
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// `[screen]` table
    #[serde(default)]
    pub screen: ScreenToml,
}

/// `[screen]` table; every key is optional
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct ScreenToml {
    pub intro_source: Option<String>,
    pub click_sound: Option<String>,
    pub roster_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// `0` disables the intro timeout
    pub intro_timeout_secs: Option<u64>,
    pub stale_responses: Option<StaleResponsePolicy>,
    pub message_buffer: Option<usize>,
}

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
#[allow(missing_docs)]
pub struct ConfigOverrides {
    pub intro_source: Option<String>,
    pub click_sound: Option<String>,
    pub roster_base_url: Option<String>,
    pub intro_timeout_secs: Option<u64>,
    pub stale_responses: Option<StaleResponsePolicy>,
}

/// Where the file layer came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file was found; defaults and environment only
    Defaults,
    /// Loaded from this path
    File(PathBuf),
}

/// `$XDG_CONFIG_HOME/herodeck/config.toml`, if a config dir exists
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("herodeck").join("config.toml"))
}

/// Parse a config file
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Build the full configuration
///
/// An explicit `path` must exist. Without one, the default path is used if
/// present and silently skipped otherwise.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a config file exists but cannot be used.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(ScreenConfig, ConfigSource), ConfigError> {
    let mut config = ScreenConfig::default();

    let file_path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let source = match file_path {
        Some(file_path) => {
            let file = load_config_from_path(&file_path)?;
            config.apply_file(&file.screen)?;
            tracing::debug!(path = ?file_path, "Loaded config file");
            ConfigSource::File(file_path)
        }
        None => ConfigSource::Defaults,
    };

    config.apply_env(|key| std::env::var(key).ok());
    config.apply_overrides(overrides);
    Ok((config, source))
}
