// src/config.rs
// =============================================================================
// Options for the embed pass.
//
// Everything has a default, so an empty (or missing) options file gives the
// stock behavior: all four providers, 400px tall video players.
//
// Example options file:
//   providers = ["youtube", "github"]
//   video_height = 315
// =============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::embed::Provider;
use crate::error::{EmbedError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedOptions {
    /// Providers to recognize. Priority order is fixed; this only picks which
    /// ones take part.
    pub providers: Vec<Provider>,

    /// Height of the video iframe, in pixels
    pub video_height: u32,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        EmbedOptions {
            providers: Provider::ALL.to_vec(),
            video_height: 400,
        }
    }
}

impl EmbedOptions {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EmbedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
