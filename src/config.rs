// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("br.com.contapartner", "ContaPartner", "conta"));

pub const DEFAULT_API_URL: &str = "https://api.contapartner.com.br";

/// Optional `config.toml` in the platform config dir.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub session_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Runtime configuration after applying flags, env and the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// `None` leaves requests without a timeout.
    pub timeout_secs: Option<u64>,
    pub session_path: PathBuf,
}

impl Config {
    /// Precedence: explicit flag/env value, then the config file, then the
    /// built-in default.
    pub fn resolve(api_url: Option<&str>, file: FileConfig) -> Result<Self> {
        let api_url = api_url
            .map(str::to_string)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_path = match file.session_path {
            Some(p) => p,
            None => session_path()?,
        };
        Ok(Config {
            api_url,
            timeout_secs: file.timeout_secs,
            session_path,
        })
    }

    /// Loads `config.toml` if it exists and resolves against it.
    pub fn load(api_url: Option<&str>) -> Result<Self> {
        let path = config_path()?;
        let file = if path.exists() {
            FileConfig::load(&path)?
        } else {
            FileConfig::default()
        };
        Self::resolve(api_url, file)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2).context("Could not determine platform-specific data dir")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn session_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("session.json"))
}
