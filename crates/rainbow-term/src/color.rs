// SPDX-License-Identifier: MIT
//
// rainbow-term color system — plain 8-bit sRGB.
//
// Bracket palettes are authored as sRGB triples (a light and a dark
// variant per depth), and the terminal consumes either 24-bit TrueColor or
// a 256-color palette index. No perceptual color math is needed on this
// path: a palette entry is resolved once and copied into every span.
//
// Conversion pipeline:
//
//   Color (sRGB8) → CellColor::Rgb → optional downgrade → CellColor::Ansi256

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use rainbow_term::color::Color;
///
/// let red = Color::rgb(255, 85, 85);
/// assert_eq!(red.to_hex(), "#ff5555");
/// assert_eq!(Color::hex("#f55"), Some(Color::rgb(255, 85, 85)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from 8-bit sRGB channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray with all three channels set to `level`.
    #[inline]
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Parse a hex color.
    ///
    /// Supports `#RGB` and `#RRGGBB`, with or without the leading `#`.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    // ─── Conversion ──────────────────────────────────────────────────────

    /// The channels as a tuple.
    #[inline]
    #[must_use]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to a 24-bit [`CellColor`] for terminal output.
    #[inline]
    #[must_use]
    pub const fn to_cell_color(self) -> CellColor {
        CellColor::Rgb(self.r, self.g, self.b)
    }

    /// Nearest entry of the xterm 256-color palette.
    ///
    /// Only the 6×6×6 cube (16–231) and the gray ramp (232–255) are
    /// considered; the first 16 entries are user-configurable in most
    /// terminals and can't be relied on.
    #[must_use]
    pub fn nearest_ansi256(self) -> u8 {
        let (ri, gi, bi) = (cube_step(self.r), cube_step(self.g), cube_step(self.b));
        let cube = Self::rgb(
            CUBE_LEVELS[usize::from(ri)],
            CUBE_LEVELS[usize::from(gi)],
            CUBE_LEVELS[usize::from(bi)],
        );
        let cube_index = 16 + 36 * ri + 6 * gi + bi;

        let step = gray_step(self);
        let gray = Self::gray(8 + 10 * step);
        let gray_index = 232 + step;

        if self.distance_sq(gray) < self.distance_sq(cube) {
            gray_index
        } else {
            cube_index
        }
    }

    /// Squared Euclidean distance in sRGB space.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = i32::from(a) - i32::from(b);
            diff.unsigned_abs().pow(2)
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for CellColor {
    fn from(color: Color) -> Self {
        color.to_cell_color()
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color for terminal output.
///
/// This is what [`crate::ansi::fg`] encodes. [`Color`] resolves to the
/// `Rgb` variant; [`CellColor::to_ansi256`] downgrades it for terminals
/// without `TrueColor`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default foreground.
    #[default]
    Default,
}

impl CellColor {
    /// Downgrade to the 256-color palette. Non-RGB colors pass through.
    #[must_use]
    pub fn to_ansi256(self) -> Self {
        match self {
            Self::Rgb(r, g, b) => Self::Ansi256(Color::rgb(r, g, b).nearest_ansi256()),
            other => other,
        }
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── 256-color palette geometry ──────────────────────────────────────────────

/// Channel levels of the xterm 6×6×6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Index (0–5) of the cube level closest to `v`.
fn cube_step(v: u8) -> u8 {
    let mut best = 0;
    let mut best_diff = u8::MAX;
    for (step, level) in (0u8..).zip(CUBE_LEVELS) {
        let diff = v.abs_diff(level);
        if diff < best_diff {
            best = step;
            best_diff = diff;
        }
    }
    best
}

/// Index (0–23) of the gray-ramp entry closest to the channel mean.
///
/// Ramp entry `k` has level `8 + 10k`.
fn gray_step(color: Color) -> u8 {
    let mean = (u16::from(color.r) + u16::from(color.g) + u16::from(color.b)) / 3;
    let step = (mean.saturating_sub(3) / 10).min(23);
    u8::try_from(step).unwrap_or(23)
}

// ─── Hex parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let digits: Vec<u8> = s
        .bytes()
        .map(parse_hex_digit)
        .collect::<Option<Vec<u8>>>()?;

    match digits.as_slice() {
        // #RGB
        &[r, g, b] => Some(Color::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
        // #RRGGBB
        &[r1, r0, g1, g0, b1, b0] => Some(Color::rgb(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
