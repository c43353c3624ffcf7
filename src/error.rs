// SPDX-License-Identifier: MIT
//
// Errors that end a `rainbow` run. The core crates never fail on text
// (unknown depths are `0`, unknown colors are the sentinel gray), so only
// I/O and configuration show up here.

use std::io;
use std::path::PathBuf;

use rainbow_theme::PaletteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
