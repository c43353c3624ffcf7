//! # rainbow-theme — depth palettes
//!
//! Maps a bracket nesting depth to a color. A palette is an ordered list of
//! [`ThemedColor`]s, each carrying a light-background and a dark-background
//! variant; depth `d` uses entry `d mod len`, so the colors cycle for deep
//! nesting. Negative depths (an unknown or invalid depth) map to a single
//! neutral sentinel that no palette entry may equal.
//!
//! ```text
//! depth ──► DepthColorMap::color_for_depth ──► ThemedColor ──► resolve(Variant) ──► Color
//! ```
//!
//! The built-in palette is an immutable `static`; user palettes are
//! validated once at construction and are read-only afterwards.

pub mod palette;

pub use palette::{DepthColorMap, PaletteError, ParseVariantError, ThemedColor, Variant};
