//! Expansion configuration types.

use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ExpandError;
use crate::ignore::IgnoreSet;

/// Extensions skipped by default when expanding a directory.
pub const DEFAULT_IGNORE_FILETYPES: &str = "m3u,db,nfo,jpg,gif,sfv,txt,sub,idx,srt,cue";

/// How subdirectories are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpansionMode {
    /// Every subdirectory is walked immediately.
    #[default]
    Expand,
    /// Subdirectories appear as containers that are expanded later.
    Collapse,
    /// Subdirectories do not appear at all.
    None,
}

impl ExpansionMode {
    /// Interpret a free-form `recursive` setting.
    ///
    /// An empty value or one starting with `none` disables recursion, one
    /// starting with `collapse` collapses, anything else expands.
    pub fn from_setting(value: &str) -> Self {
        if value.is_empty() || value.starts_with("none") {
            Self::None
        } else if value.starts_with("collapse") {
            Self::Collapse
        } else {
            Self::Expand
        }
    }
}

/// Configuration for directory expansion.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ExpandConfig {
    /// Subdirectory behavior.
    #[builder(default)]
    #[serde(default)]
    pub recursive: ExpansionMode,

    /// Comma-separated list of extensions to leave out.
    #[builder(default = "DEFAULT_IGNORE_FILETYPES.to_string()")]
    #[serde(default = "default_ignore_filetypes", alias = "ignore-filetypes")]
    pub ignore_filetypes: String,
}

fn default_ignore_filetypes() -> String {
    DEFAULT_IGNORE_FILETYPES.to_string()
}

/// Extensions are listed without their leading dot.
fn check_ignore_list(list: &str) -> Result<(), String> {
    if list.split(',').any(|ext| ext.trim_start_matches(' ').starts_with('.')) {
        return Err("Ignored extensions must not start with '.'".to_string());
    }
    Ok(())
}

impl ExpandConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.ignore_filetypes {
            Some(ref list) => check_ignore_list(list),
            None => Ok(()),
        }
    }
}

impl ExpandConfig {
    /// Create a new expand config builder.
    pub fn builder() -> ExpandConfigBuilder {
        ExpandConfigBuilder::default()
    }

    /// Create a config with the given mode and the default ignore list.
    pub fn new(recursive: ExpansionMode) -> Self {
        Self {
            recursive,
            ignore_filetypes: default_ignore_filetypes(),
        }
    }

    /// Parse the ignore list into a set.
    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet::parse(&self.ignore_filetypes)
    }

    /// Check the same constraints the builder enforces.
    ///
    /// Needed after deserializing or after editing the public fields.
    pub fn validate(&self) -> Result<(), ExpandError> {
        check_ignore_list(&self.ignore_filetypes)
            .map_err(|message| ExpandError::InvalidConfig { message })
    }

    /// Load a config from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ExpandError> {
        let config: Self = toml::from_str(text).map_err(|e| ExpandError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ExpandError> {
        let text = std::fs::read_to_string(path).map_err(|e| ExpandError::io(path, e))?;
        Self::from_toml(&text)
    }
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self::new(ExpansionMode::Expand)
    }
}
