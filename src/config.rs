// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

/// Default file the binary reads its settings from.
pub const DEFAULT_CONFIG_PATH: &str = "dumpload.yaml";

/// Default number of rows per multi-row INSERT.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Runtime settings for one pipeline run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Location of the `.tar.gz` dump.
    pub download_url: Url,
    /// SQLite file the tables are written to; its parent is created on demand.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Scratch directory holding the archive and the extracted CSVs.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("out/database.sqlite")
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("tmp")
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Config {
    /// Config with defaults for everything except the download URL.
    pub fn new(download_url: Url) -> Self {
        Self {
            download_url,
            database_path: default_database_path(),
            work_dir: default_work_dir(),
            batch_size: default_batch_size(),
        }
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        if cfg.batch_size == 0 {
            anyhow::bail!("batch_size must be at least 1");
        }
        Ok(cfg)
    }

    /// Where the downloaded archive is stored inside `work_dir`.
    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join("dump.tar.gz")
    }
}
