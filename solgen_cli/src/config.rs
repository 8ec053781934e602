//! Configuration file handling for the solgen CLI

use anyhow::{Context, Result};
use serde_derive::{Deserialize, Serialize};
use solgen_gen::Lang;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "solgen.yaml";

/// Output directory used when neither the file nor the flags name one.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Settings as they appear in the YAML file. Every key is optional so
/// command-line flags can fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment file listing the contracts to compile
    #[serde(default)]
    pub deployment_path: Option<PathBuf>,

    /// Per-contract allow-list file
    #[serde(default)]
    pub option_path: Option<PathBuf>,

    /// Root of the generated tree
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Target language
    #[serde(default)]
    pub language: Option<Lang>,
}

/// Fully resolved settings for `solgen run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub deployment_path: PathBuf,
    pub option_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub language: Lang,
}

impl Config {
    /// Load configuration from an explicit path. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Load `solgen.yaml` from `dir` if it exists, otherwise the empty config.
    pub fn load_default(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        /* An empty document deserializes to unit, not to a map */
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(text)?)
    }

    /// Overlays `overrides` on top of `self`; values present in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            deployment_path: overrides.deployment_path.or(self.deployment_path),
            option_path: overrides.option_path.or(self.option_path),
            output_path: overrides.output_path.or(self.output_path),
            language: overrides.language.or(self.language),
        }
    }

    /// Fills defaults and checks that a deployment file was named.
    pub fn resolve(self) -> Result<RunSettings> {
        let deployment_path = self.deployment_path.context(
            "no deployment file given; pass --deployment or set deployment_path in the config file",
        )?;
        Ok(RunSettings {
            deployment_path,
            option_path: self.option_path,
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            language: self.language.unwrap_or(Lang::Go),
        })
    }
}
