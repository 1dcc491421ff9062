//! Formation generators
//!
//! A formation is turned into a flat, ordered list of [`Marker`]s in tile
//! units. All generators are pure; the same inputs always give the same
//! markers in the same order.

use glam::{DVec2, dvec2};
use indexmap::IndexMap;

use crate::types::{Color, TilePoint};

/// Discrete offset of a pattern entry, relative to the formation center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternOffset {
    pub x: i32,
    pub y: i32,
}

impl PatternOffset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn as_dvec2(self) -> DVec2 {
        dvec2(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for PatternOffset {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Label of a pattern entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Label {
    /// Entry is present but draws no text
    #[default]
    Blank,
    Text(String),
}

impl Label {
    /// Empty strings collapse to [`Label::Blank`]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Label::Blank
        } else {
            Label::Text(text)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Label::Blank => None,
            Label::Text(text) => Some(text),
        }
    }
}

/// Ordered offset -> label mapping.
///
/// Re-inserting an offset replaces its label but keeps the slot it was first
/// inserted at.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormationPattern {
    entries: IndexMap<PatternOffset, Label>,
}

impl FormationPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern of blank entries
    pub fn from_offsets<I, O>(offsets: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<PatternOffset>,
    {
        offsets
            .into_iter()
            .map(|offset| (offset.into(), Label::Blank))
            .collect()
    }

    /// Insert or replace; returns the previous label if the offset was present
    pub fn insert(&mut self, offset: impl Into<PatternOffset>, label: Label) -> Option<Label> {
        self.entries.insert(offset.into(), label)
    }

    pub fn get(&self, offset: PatternOffset) -> Option<&Label> {
        self.entries.get(&offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternOffset, &Label)> {
        self.entries.iter().map(|(offset, label)| (*offset, label))
    }

    /// Center of the bounding box of all offsets, or `None` when empty
    pub fn bounding_center(&self) -> Option<DVec2> {
        let mut offsets = self.entries.keys().map(|o| o.as_dvec2());
        let first = offsets.next()?;
        let (min, max) = offsets.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some((min + max) / 2.0)
    }
}

impl<O: Into<PatternOffset>> FromIterator<(O, Label)> for FormationPattern {
    fn from_iter<T: IntoIterator<Item = (O, Label)>>(iter: T) -> Self {
        let mut pattern = FormationPattern::new();
        for (offset, label) in iter {
            pattern.insert(offset, label);
        }
        pattern
    }
}

/// A colored position in tile units, with an optional label
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: TilePoint,
    pub color: Color,
    pub label: Option<String>,
}

// ============================================================================
// Generators
// ============================================================================

/// Place every pattern entry around `center`.
///
/// With `center_pattern` the bounding-box center of the offsets is moved onto
/// `center` first. Offsets are then multiplied by `gap_multiplier`.
pub fn pattern_markers(
    pattern: &FormationPattern,
    center: TilePoint,
    color: &Color,
    gap_multiplier: f64,
    center_pattern: bool,
) -> Vec<Marker> {
    let shift = match pattern.bounding_center() {
        Some(bounds_center) if center_pattern => -bounds_center,
        _ => DVec2::ZERO,
    };

    pattern
        .iter()
        .map(|(offset, label)| Marker {
            position: center + (offset.as_dvec2() + shift) * gap_multiplier,
            color: color.clone(),
            label: label.as_text().map(str::to_string),
        })
        .collect()
}

/// A horizontal row of `total_count` markers, evenly spaced and centered on `center`
pub fn silent_wave(center: TilePoint, gap: f64, total_count: usize, color: &Color) -> Vec<Marker> {
    let start = center.x() - (total_count as f64 - 1.0) * gap / 2.0;
    (0..total_count)
        .map(|i| Marker {
            position: TilePoint::new(start + i as f64 * gap, center.y()),
            color: color.clone(),
            label: None,
        })
        .collect()
}

/// Pairs of markers stepping upward from `center`.
///
/// Each pair sits `throw_gap` apart horizontally; every pair is `gap` above
/// the previous one, the first already one `gap` above the center.
pub fn saturn(
    center: TilePoint,
    throw_gap: f64,
    gap: f64,
    total_count: usize,
    color: &Color,
) -> Vec<Marker> {
    let half_throw = throw_gap / 2.0;
    let mut y_offset = 0.0;
    let mut markers = Vec::with_capacity(total_count);

    for i in 0..total_count {
        let x_offset = if i % 2 == 0 {
            y_offset -= gap;
            -half_throw
        } else {
            half_throw
        };
        markers.push(Marker {
            position: center + dvec2(x_offset, y_offset),
            color: color.clone(),
            label: None,
        });
    }

    markers
}

// ============================================================================
// Built-in patterns
// ============================================================================

/// Patterns available to scenes without a `pattern` definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPattern {
    /// 4 wide, 3 deep block
    Box,
    /// Outer ring plus inner cross, `diamond(inner, outer)`
    Diamond,
    /// Chevron pointing up
    Arrow,
}

impl BuiltinPattern {
    pub const ALL: [BuiltinPattern; 3] = [Self::Box, Self::Diamond, Self::Arrow];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPattern::Box => "box",
            BuiltinPattern::Diamond => "diamond",
            BuiltinPattern::Arrow => "arrow",
        }
    }

    /// Number of arguments accepted (all optional)
    pub fn max_args(self) -> usize {
        match self {
            BuiltinPattern::Diamond => 2,
            BuiltinPattern::Box | BuiltinPattern::Arrow => 0,
        }
    }

    /// Build the pattern. Missing arguments take their defaults; callers
    /// check the count against [`Self::max_args`] first.
    pub fn build(self, args: &[i32]) -> FormationPattern {
        match self {
            BuiltinPattern::Box => box_pattern(),
            BuiltinPattern::Diamond => diamond_pattern(
                args.first().copied().unwrap_or(1),
                args.get(1).copied().unwrap_or(2),
            ),
            BuiltinPattern::Arrow => arrow_pattern(),
        }
    }
}

fn box_pattern() -> FormationPattern {
    FormationPattern::from_offsets(
        [0i32, -1, -2]
            .into_iter()
            .flat_map(|y| (0i32..=3).map(move |x| (x, y))),
    )
}

fn diamond_pattern(inner: i32, outer: i32) -> FormationPattern {
    FormationPattern::from_offsets([
        (0, -outer * 2),
        (outer, -outer),
        (outer * 2, 0),
        (outer, outer),
        (0, outer * 2),
        (-outer, outer),
        (-outer * 2, 0),
        (-outer, -outer),
        (-inner, 0),
        (inner, 0),
        (0, -inner),
        (0, inner),
    ])
}

const ARROW: [(i32, i32); 12] = [
    (0, 0),
    (-1, -1),
    (1, -1),
    (-2, -2),
    (0, -2),
    (2, -2),
    (-1, -3),
    (1, -3),
    (-3, -3),
    (3, -3),
    (-2, -4),
    (2, -4),
];

fn arrow_pattern() -> FormationPattern {
    FormationPattern::from_offsets(ARROW)
}

// ============================================================================
// Formations
// ============================================================================

/// A fully parameterized formation
#[derive(Debug, Clone, PartialEq)]
pub enum Formation {
    Pattern {
        pattern: FormationPattern,
        center: TilePoint,
        color: Color,
        gap: f64,
        centered: bool,
    },
    Wave {
        center: TilePoint,
        gap: f64,
        count: usize,
        color: Color,
    },
    Saturn {
        center: TilePoint,
        throw_gap: f64,
        gap: f64,
        count: usize,
        color: Color,
    },
}

impl Formation {
    pub fn markers(&self) -> Vec<Marker> {
        match self {
            Formation::Pattern {
                pattern,
                center,
                color,
                gap,
                centered,
            } => pattern_markers(pattern, *center, color, *gap, *centered),
            Formation::Wave {
                center,
                gap,
                count,
                color,
            } => silent_wave(*center, *gap, *count, color),
            Formation::Saturn {
                center,
                throw_gap,
                gap,
                count,
                color,
            } => saturn(*center, *throw_gap, *gap, *count, color),
        }
    }
}
