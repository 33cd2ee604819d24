// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use metapick_app::{DEFAULT_METADATA_TYPE, DEFAULT_METADATA_TYPES};
use metapick_source::DEFAULT_PROGRAM;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "metapick";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_POLL_INTERVAL: &str = "120ms";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: Source::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    pub program: Option<String>,
    pub metadata_type: Option<String>,
    pub target_org: Option<String>,
    pub metadata_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub poll_interval: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            poll_interval: Some(DEFAULT_POLL_INTERVAL.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("METAPICK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set METAPICK_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [source], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `metapick --print-example-config` for a template",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(program) = &self.source.program
            && program.trim().is_empty()
        {
            bail!("source.program in {} must not be empty", path.display());
        }

        if let Some(metadata_type) = &self.source.metadata_type
            && metadata_type.trim().is_empty()
        {
            bail!(
                "source.metadata_type in {} must not be empty",
                path.display()
            );
        }

        if let Some(types) = &self.source.metadata_types
            && types.iter().any(|name| name.trim().is_empty())
        {
            bail!(
                "source.metadata_types in {} must not contain empty names",
                path.display()
            );
        }

        if let Some(interval) = &self.ui.poll_interval {
            let parsed = parse_duration(interval)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "ui.poll_interval in {} must be positive, got {}",
                    path.display(),
                    interval
                );
            }
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join("/"),
                level
            );
        }

        Ok(())
    }

    pub fn program(&self) -> &str {
        self.source.program.as_deref().unwrap_or(DEFAULT_PROGRAM)
    }

    pub fn metadata_type(&self) -> &str {
        self.source
            .metadata_type
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_TYPE)
    }

    pub fn target_org(&self) -> Option<&str> {
        self.source.target_org.as_deref()
    }

    pub fn metadata_types(&self) -> Vec<String> {
        match &self.source.metadata_types {
            Some(types) if !types.is_empty() => types.clone(),
            _ => DEFAULT_METADATA_TYPES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    pub fn poll_interval(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .poll_interval
                .as_deref()
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let cache_root = dirs::cache_dir().ok_or_else(|| {
            anyhow!("cannot resolve cache directory; set [log].path in the config file")
        })?;
        Ok(cache_root.join(APP_NAME).join("metapick.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# metapick config\n# Place this file at: {}\n\nversion = 1\n\n[source]\nprogram = \"{}\"\nmetadata_type = \"{}\"\n# target_org = \"my-org\"\n# metadata_types = [\"ApexClass\", \"ApexTrigger\", \"Flow\"]\n\n[ui]\npoll_interval = \"{}\"\n\n[log]\nlevel = \"{}\"\n# Optional. Default is the platform cache dir (for example ~/.cache/metapick/metapick.log)\n# path = \"/absolute/path/to/metapick.log\"\n",
            path.display(),
            DEFAULT_PROGRAM,
            DEFAULT_METADATA_TYPE,
            DEFAULT_POLL_INTERVAL,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 120ms or 1s)")
}
