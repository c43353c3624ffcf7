// SPDX-License-Identifier: MIT
//
// TOML configuration for the `rainbow` binary.
//
//   theme = "dark"            # "light" | "dark"
//   color_mode = "truecolor"  # "truecolor" | "ansi256"
//   angle_brackets = true
//
//   [[palette]]               # optional, replaces the built-in palette
//   light = "#ff5555"
//   dark = "#ff5f5f"
//
// Every key is optional. Unknown keys are an error so a typo doesn't
// silently fall back to a default.

use std::fs;
use std::path::Path;

use rainbow_editor::ScanOptions;
use rainbow_theme::{DepthColorMap, PaletteError, ThemedColor, Variant};
use serde::Deserialize;

use crate::error::Error;

/// How colors reach the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 24-bit `38;2;r;g;b`.
    #[default]
    Truecolor,
    /// Nearest xterm-256 index, for terminals without truecolor.
    Ansi256,
}

/// One `[[palette]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteEntry {
    pub light: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: Variant,
    pub color_mode: ColorMode,
    pub angle_brackets: bool,
    pub palette: Vec<PaletteEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Variant::default(),
            color_mode: ColorMode::default(),
            angle_brackets: true,
            palette: Vec::new(),
        }
    }
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::parse(&source).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// The configured palette, or the built-in one when none is given.
    pub fn depth_colors(&self) -> Result<DepthColorMap, PaletteError> {
        if self.palette.is_empty() {
            return Ok(DepthColorMap::builtin());
        }
        let colors = self
            .palette
            .iter()
            .map(|entry| ThemedColor::from_hex(&entry.light, &entry.dark))
            .collect::<Result<Vec<_>, _>>()?;
        DepthColorMap::new(colors)
    }

    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            angle_brackets: self.angle_brackets,
        }
    }
}
