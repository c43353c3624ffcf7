// SPDX-License-Identifier: MIT
//
// rainbow-term — terminal output for rainbow.
//
// The smallest slice of a terminal backend that a bracket colorizer needs:
// an 8-bit sRGB color type, the compact `CellColor` that actually reaches
// the terminal, the SGR byte encodings for foreground colors, and a painter
// that streams a document with colored spans spliced in. Everything writes
// to `impl Write`, so tests run against a `Vec<u8>`.

pub mod ansi;
pub mod color;
pub mod paint;

pub use color::{CellColor, Color};
pub use paint::{Painted, write_painted};
