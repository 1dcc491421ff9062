//! Strongly-typed coordinate primitives (zero-cost newtypes over `glam`).
//!
//! Tile-space and pixel-space positions are distinct types so a tile
//! coordinate can never be drawn without going through a [`TileScaler`].

use glam::{DVec2, dvec2};
use std::fmt;
use std::ops::Add;

/// Why a length was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SizeError {
    #[error("not a number")]
    NotANumber,
    #[error("must be finite")]
    Unbounded,
    #[error("must be greater than zero")]
    Zero,
    #[error("must not be negative")]
    Negative,
}

/// Accept finite lengths above zero
pub fn positive_length(length: f64) -> Result<f64, SizeError> {
    match length {
        l if l.is_nan() => Err(SizeError::NotANumber),
        l if l.is_infinite() => Err(SizeError::Unbounded),
        l if l < 0.0 => Err(SizeError::Negative),
        l if l == 0.0 => Err(SizeError::Zero),
        l => Ok(l),
    }
}

/// A position in tile units. Fractional values are allowed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct TilePoint(pub DVec2);

impl TilePoint {
    pub const ORIGIN: TilePoint = TilePoint(DVec2::ZERO);

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        TilePoint(dvec2(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }
}

impl Add<DVec2> for TilePoint {
    type Output = TilePoint;
    fn add(self, rhs: DVec2) -> TilePoint {
        TilePoint(self.0 + rhs)
    }
}

impl fmt::Display for TilePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// A position in document pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct PixelPoint(pub DVec2);

impl PixelPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        PixelPoint(dvec2(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }
}

impl Add<DVec2> for PixelPoint {
    type Output = PixelPoint;
    fn add(self, rhs: DVec2) -> PixelPoint {
        PixelPoint(self.0 + rhs)
    }
}

/// A color as written into the document (`#rrggbb`, a CSS name, ...).
///
/// Colors are never parsed or validated; malformed values are passed to the
/// renderer untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Color(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts tile coordinates to pixels. The only place the tile size is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileScaler {
    tile_size: f64,
}

impl TileScaler {
    /// Build a scaler, rejecting non-positive or non-finite tile sizes
    pub fn try_new(tile_size: f64) -> Result<Self, SizeError> {
        positive_length(tile_size).map(|tile_size| TileScaler { tile_size })
    }

    #[inline]
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Tile position -> pixel position
    #[inline]
    pub fn px(&self, p: TilePoint) -> PixelPoint {
        PixelPoint(p.0 * self.tile_size)
    }

    /// Length in tiles -> length in pixels
    #[inline]
    pub fn len(&self, tiles: f64) -> f64 {
        tiles * self.tile_size
    }
}
