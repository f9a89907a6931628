use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const SETTINGS_FILE: &str = "jsonifyer";
const ENV_PREFIX: &str = "JSONIFYER";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned for schedule pages.
    pub input_dir: PathBuf,
    /// Where artifacts go; the input directory when unset.
    pub out_dir: Option<PathBuf>,
    pub write_index: bool,
    /// Skip unreadable files instead of aborting the run.
    pub keep_going: bool,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            out_dir: None,
            write_index: false,
            keep_going: false,
            dry_run: false,
        }
    }
}

impl Settings {
    /// `jsonifyer.toml` (optional) then `JSONIFYER_*` environment variables.
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name(SETTINGS_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or(&self.input_dir)
    }
}
