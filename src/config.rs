use crate::pattern::TemplateSource;
use anyhow::anyhow;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory rendered paths are placed under.
    #[serde(default = "default_library_root")]
    pub library_root: PathBuf,
    #[serde(default)]
    pub folder_template: Option<String>,
    #[serde(default)]
    pub file_template: Option<String>,
    /// When set, logs are also written to a daily-rotated file here.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Post-processing applied to every rendered pattern.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub lowercase: bool,
    /// Replace every space with this string.
    #[serde(default)]
    pub replace_spaces: Option<String>,
}

fn default_library_root() -> PathBuf {
    dirs::audio_dir().unwrap_or_else(|| PathBuf::from("Music"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_root: default_library_root(),
            folder_template: None,
            file_template: None,
            log_dir: None,
            filter: FilterConfig::default(),
        }
    }
}

/// `<config dir>/file-name-pattern/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("file-name-pattern").join("config.toml"))
}

impl Config {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Build the filter hook described by `[filter]`, if it does anything.
    pub fn filter(&self) -> Option<impl Fn(&str) -> String + Send + Sync + 'static> {
        let lowercase = self.filter.lowercase;
        let replace_spaces = self.filter.replace_spaces.clone();
        if !lowercase && replace_spaces.is_none() {
            return None;
        }
        Some(move |input: &str| {
            let mut out = if lowercase { input.to_lowercase() } else { input.to_string() };
            if let Some(r) = &replace_spaces {
                out = out.replace(' ', r);
            }
            out
        })
    }
}

impl TemplateSource for Config {
    fn folder_template(&self) -> anyhow::Result<String> {
        self.folder_template
            .clone()
            .ok_or_else(|| anyhow!("folder_template is not configured"))
    }

    fn file_template(&self) -> anyhow::Result<String> {
        self.file_template
            .clone()
            .ok_or_else(|| anyhow!("file_template is not configured"))
    }
}
