//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - `$MOVE_LOG_CONFIG` must point at a readable, valid file when set.
//! - The default location is optional; a missing file means defaults.
//!
//! Notes:
//! - Unknown XML fields are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "persist")]
    persist: Option<bool>,
    /// Longest move kept, in characters
    #[serde(rename = "max_move_len", default, deserialize_with = "de_usize_trimmed_opt")]
    max_move_len: Option<usize>,
}

// Trims surrounding whitespace; unparsable values fall back to the default.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

// Map XmlConfig -> Config, keeping defaults for anything unset or invalid.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(level) = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok())
    {
        cfg.log_level = level;
    }
    cfg.log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    });
    cfg.persist = parsed.persist.unwrap_or(false);
    if let Some(n) = parsed.max_move_len.filter(|n| *n > 0) {
        cfg.max_move_len = n;
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Resolve and load the config for this invocation.
///
/// - `$MOVE_LOG_CONFIG` set: that file must exist and parse.
/// - otherwise the default path is used if a file exists there.
/// - otherwise built-in defaults.
pub fn load_config() -> Result<Config> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|p| !p.is_empty());
    let Some(path) = default_config_path() else {
        debug!("No config location available; using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        if explicit {
            bail!(
                "{} points at a missing config file: {}",
                CONFIG_ENV,
                path.display()
            );
        }
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }

    load_config_from_xml_path(&path)
}
