//! Depth-to-color mapping.
//!
//! [`DepthColorMap::color_for_depth`] is the whole contract: a pure function
//! from an integer depth to a [`ThemedColor`]. The built-in seven-entry
//! palette (red, orange, yellow, green, blue, purple, pink) is shared by
//! every caller through [`DepthColorMap::builtin`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use rainbow_term::color::Color;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Which background a color has to read well on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Light,
    #[default]
    Dark,
}

/// Error for a variant name that is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme variant `{0}` (expected `light` or `dark`)")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseVariantError(s.to_owned())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

// ---------------------------------------------------------------------------
// ThemedColor
// ---------------------------------------------------------------------------

/// A color with a light-theme and a dark-theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemedColor {
    pub light: Color,
    pub dark: Color,
}

impl ThemedColor {
    #[must_use]
    pub const fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }

    /// The same color on both backgrounds.
    #[must_use]
    pub const fn uniform(color: Color) -> Self {
        Self::new(color, color)
    }

    /// Parse a pair of hex strings (see [`Color::hex`]).
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidHex`] naming the first string that fails.
    pub fn from_hex(light: &str, dark: &str) -> Result<Self, PaletteError> {
        let parse = |value: &str| {
            Color::hex(value).ok_or_else(|| PaletteError::InvalidHex {
                value: value.to_owned(),
            })
        };
        Ok(Self::new(parse(light)?, parse(dark)?))
    }

    /// Pick the variant for the active background.
    #[inline]
    #[must_use]
    pub const fn resolve(self, variant: Variant) -> Color {
        match variant {
            Variant::Light => self.light,
            Variant::Dark => self.dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in palette
// ---------------------------------------------------------------------------

/// The default bracket palette, one entry per nesting level.
pub const BRACKET_COLORS: [ThemedColor; 7] = [
    ThemedColor::new(Color::rgb(255, 85, 85), Color::rgb(255, 95, 95)),    // Red
    ThemedColor::new(Color::rgb(255, 184, 108), Color::rgb(255, 194, 118)), // Orange
    ThemedColor::new(Color::rgb(253, 203, 110), Color::rgb(255, 213, 120)), // Yellow
    ThemedColor::new(Color::rgb(100, 200, 130), Color::rgb(110, 210, 140)), // Green
    ThemedColor::new(Color::rgb(120, 180, 255), Color::rgb(130, 190, 255)), // Blue
    ThemedColor::new(Color::rgb(200, 140, 255), Color::rgb(210, 150, 255)), // Purple
    ThemedColor::new(Color::rgb(255, 140, 200), Color::rgb(255, 150, 210)), // Pink
];

const BRACKET_SLICE: &[ThemedColor] = &BRACKET_COLORS;

/// Color for a depth that can't be resolved (negative depth).
pub const SENTINEL: ThemedColor = ThemedColor::uniform(Color::gray(128));

static BUILTIN: DepthColorMap = DepthColorMap::builtin();

// ---------------------------------------------------------------------------
// DepthColorMap
// ---------------------------------------------------------------------------

/// Palette validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
    #[error("palette entry {index} repeats entry {first}")]
    Duplicate { index: usize, first: usize },
    #[error("palette entry {index} is the reserved unknown-depth gray")]
    Sentinel { index: usize },
    #[error("invalid hex color `{value}`")]
    InvalidHex { value: String },
}

/// Cyclic depth → color mapping.
///
/// Invariants, checked by [`DepthColorMap::new`]: at least one entry, no
/// two entries share a light or a dark variant, and no entry matches
/// [`SENTINEL`] on either background. Consecutive depths `0..len` therefore
/// always resolve to distinct colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthColorMap {
    colors: Cow<'static, [ThemedColor]>,
}

impl DepthColorMap {
    /// The built-in seven-color palette.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            colors: Cow::Borrowed(BRACKET_SLICE),
        }
    }

    /// Shared reference to the built-in palette.
    #[must_use]
    pub fn shared() -> &'static Self {
        &BUILTIN
    }

    /// Build a palette from user-supplied colors.
    ///
    /// # Errors
    ///
    /// Returns a [`PaletteError`] if the list is empty, contains a repeated
    /// variant, or uses the sentinel gray.
    pub fn new(colors: Vec<ThemedColor>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        for (index, color) in colors.iter().enumerate() {
            if color.light == SENTINEL.light || color.dark == SENTINEL.dark {
                return Err(PaletteError::Sentinel { index });
            }
            if let Some(first) = colors[..index]
                .iter()
                .position(|c| c.light == color.light || c.dark == color.dark)
            {
                return Err(PaletteError::Duplicate { index, first });
            }
        }
        Ok(Self {
            colors: Cow::Owned(colors),
        })
    }

    /// Color for a nesting depth.
    ///
    /// Negative depths get [`SENTINEL`]; everything else cycles through the
    /// palette.
    #[must_use]
    pub fn color_for_depth(&self, depth: i64) -> ThemedColor {
        usize::try_from(depth).map_or(SENTINEL, |depth| self.color_at(depth))
    }

    /// Color for a depth that is known to be non-negative.
    #[must_use]
    pub fn color_at(&self, depth: usize) -> ThemedColor {
        self.colors
            .get(depth % self.colors.len())
            .copied()
            .unwrap_or(SENTINEL)
    }

    /// The unknown-depth color.
    #[inline]
    #[must_use]
    pub const fn sentinel() -> ThemedColor {
        SENTINEL
    }

    /// Number of palette entries (the cycle length).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: an empty palette can't be constructed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemedColor> {
        self.colors.iter()
    }
}

impl Default for DepthColorMap {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> &'static DepthColorMap {
        DepthColorMap::shared()
    }

    #[test]
    fn builtin_has_seven_entries() {
        assert_eq!(palette().len(), 7);
        assert!(!palette().is_empty());
    }

    #[test]
    fn builtin_passes_validation() {
        let rebuilt = DepthColorMap::new(BRACKET_COLORS.to_vec()).unwrap();
        assert_eq!(&rebuilt, palette());
    }

    #[test]
    fn first_depths_are_distinct() {
        let size = i64::try_from(palette().len()).unwrap();
        for a in 0..size {
            for b in 0..size {
                if a != b {
                    assert_ne!(palette().color_for_depth(a), palette().color_for_depth(b));
                }
            }
        }
    }

    #[test]
    fn colors_cycle() {
        let p = palette();
        assert_eq!(p.color_for_depth(0), p.color_for_depth(7));
        assert_eq!(p.color_for_depth(0), p.color_for_depth(14));
        for d in 0..30 {
            assert_eq!(p.color_for_depth(d), p.color_for_depth(d + 7));
        }
    }

    #[test]
    fn depth_zero_is_red() {
        let c = palette().color_for_depth(0);
        assert_eq!(c.light, Color::rgb(255, 85, 85));
        assert_eq!(c.dark, Color::rgb(255, 95, 95));
    }

    #[test]
    fn negative_depth_is_sentinel() {
        let p = palette();
        assert_eq!(p.color_for_depth(-1), SENTINEL);
        assert_eq!(p.color_for_depth(i64::MIN), SENTINEL);
        assert_eq!(DepthColorMap::sentinel(), SENTINEL);
        assert!(p.iter().all(|c| *c != SENTINEL));
    }

    #[test]
    fn huge_depth_still_cycles() {
        let p = palette();
        assert_eq!(p.color_for_depth(i64::MAX), p.color_at(usize::try_from(i64::MAX % 7).unwrap()));
    }

    #[test]
    fn resolve_picks_variant() {
        let c = BRACKET_COLORS[4];
        assert_eq!(c.resolve(Variant::Light), Color::rgb(120, 180, 255));
        assert_eq!(c.resolve(Variant::Dark), Color::rgb(130, 190, 255));
    }

    #[test]
    fn custom_palette_cycles_on_its_own_length() {
        let p = DepthColorMap::new(vec![
            ThemedColor::uniform(Color::rgb(255, 0, 0)),
            ThemedColor::uniform(Color::rgb(0, 0, 255)),
        ])
        .unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.color_for_depth(0), p.color_for_depth(2));
        assert_ne!(p.color_for_depth(0), p.color_for_depth(1));
    }

    #[test]
    fn empty_palette_rejected() {
        assert_eq!(DepthColorMap::new(Vec::new()), Err(PaletteError::Empty));
    }

    #[test]
    fn duplicate_variant_rejected() {
        let red = Color::rgb(255, 0, 0);
        let err = DepthColorMap::new(vec![
            ThemedColor::new(red, Color::rgb(1, 1, 1)),
            ThemedColor::new(Color::rgb(0, 255, 0), Color::rgb(2, 2, 2)),
            ThemedColor::new(red, Color::rgb(3, 3, 3)),
        ]);
        assert_eq!(err, Err(PaletteError::Duplicate { index: 2, first: 0 }));
    }

    #[test]
    fn sentinel_rejected() {
        let err = DepthColorMap::new(vec![
            ThemedColor::uniform(Color::rgb(255, 0, 0)),
            ThemedColor::new(Color::rgb(0, 255, 0), Color::gray(128)),
        ]);
        assert_eq!(err, Err(PaletteError::Sentinel { index: 1 }));
    }

    #[test]
    fn from_hex_pairs() {
        let c = ThemedColor::from_hex("#ff5555", "ff5f5f").unwrap();
        assert_eq!(c, BRACKET_COLORS[0]);
        assert_eq!(
            ThemedColor::from_hex("#ff5555", "nope"),
            Err(PaletteError::InvalidHex { value: "nope".into() })
        );
    }

    #[test]
    fn variant_parsing() {
        assert_eq!("light".parse::<Variant>(), Ok(Variant::Light));
        assert_eq!("DARK".parse::<Variant>(), Ok(Variant::Dark));
        assert!("dim".parse::<Variant>().is_err());
        assert_eq!(Variant::default(), Variant::Dark);
        assert_eq!(Variant::Light.to_string(), "light");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            PaletteError::Duplicate { index: 3, first: 1 }.to_string(),
            "palette entry 3 repeats entry 1"
        );
        assert_eq!(
            ParseVariantError("dim".into()).to_string(),
            "unknown theme variant `dim` (expected `light` or `dark`)"
        );
    }
}
