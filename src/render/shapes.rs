//! Drawable primitives for the grid document
//!
//! Each primitive is its own type that knows:
//! - the point it is positioned by
//! - the identifier it is written under
//! - how to render itself to an SVG element

use ::svg::node::element::{Element, Group, Line, Rectangle, Text};
use enum_dispatch::enum_dispatch;
use glam::dvec2;

use super::defaults;
use super::svg::fmt_num;
use crate::types::{Color, PixelPoint};

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Shape {
    /// Top-left corner for cells, crossing point for markers
    fn anchor(&self) -> PixelPoint;

    /// Value of the `id` attribute, derived from the anchor
    fn id(&self) -> String;

    /// Render this primitive to an SVG element
    fn render_svg(&self) -> Element;
}

// ============================================================================
// Cells
// ============================================================================

/// A filled square grid cell with a dashed black outline
#[derive(Debug, Clone, PartialEq)]
pub struct CellPrimitive {
    pub origin: PixelPoint,
    pub size: f64,
    pub fill: Color,
}

/// Build a cell anchored at its top-left corner.
///
/// Sizes are not validated: a negative size gives degenerate geometry, not an error.
pub fn build_cell(x: f64, y: f64, size: f64, fill: Color) -> CellPrimitive {
    CellPrimitive {
        origin: PixelPoint::new(x, y),
        size,
        fill,
    }
}

impl Shape for CellPrimitive {
    fn anchor(&self) -> PixelPoint {
        self.origin
    }

    fn id(&self) -> String {
        format!(
            "Rectangle_{}_{}",
            fmt_num(self.origin.x()),
            fmt_num(self.origin.y())
        )
    }

    fn render_svg(&self) -> Element {
        Rectangle::new()
            .set("x", fmt_num(self.origin.x()))
            .set("y", fmt_num(self.origin.y()))
            .set("width", fmt_num(self.size))
            .set("height", fmt_num(self.size))
            .set("transform", defaults::CELL_TRANSFORM)
            .set("fill", self.fill.as_str())
            .set("fill-opacity", "1")
            .set("stroke", defaults::CELL_STROKE)
            .set("stroke-width", fmt_num(defaults::CELL_STROKE_WIDTH))
            .set("stroke-dasharray", defaults::CELL_DASHARRAY)
            .set("opacity", "1")
            .set("id", self.id())
            .into()
    }
}

// ============================================================================
// Markers
// ============================================================================

/// One stroke of a marker cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: PixelPoint,
    pub to: PixelPoint,
}

/// Centered label text drawn over a marker
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub at: PixelPoint,
    pub content: String,
}

/// A crossed-line marker with an optional label
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPrimitive {
    pub center: PixelPoint,
    pub color: Color,
    pub stroke_width: f64,
    pub strokes: [LineSegment; 2],
    pub label: Option<LabelPrimitive>,
}

/// Build a marker: two diagonals of a `size`-sided square centered on (x, y).
///
/// An empty label is the same as no label; no text element is produced.
pub fn build_marker(
    x: f64,
    y: f64,
    size: f64,
    color: Color,
    stroke_width: f64,
    label: Option<&str>,
) -> MarkerPrimitive {
    let center = PixelPoint::new(x, y);
    let half = size / 2.0;

    // top-left to bottom-right, then top-right to bottom-left
    let strokes = [
        LineSegment {
            from: center + dvec2(-half, -half),
            to: center + dvec2(half, half),
        },
        LineSegment {
            from: center + dvec2(half, -half),
            to: center + dvec2(-half, half),
        },
    ];

    let label = label.filter(|text| !text.is_empty()).map(|text| LabelPrimitive {
        at: center,
        content: text.to_string(),
    });

    MarkerPrimitive {
        center,
        color,
        stroke_width,
        strokes,
        label,
    }
}

impl LineSegment {
    fn render_svg(&self, color: &Color, stroke_width: f64) -> Line {
        Line::new()
            .set("x1", fmt_num(self.from.x()))
            .set("y1", fmt_num(self.from.y()))
            .set("x2", fmt_num(self.to.x()))
            .set("y2", fmt_num(self.to.y()))
            .set("opacity", fmt_num(defaults::MARKER_OPACITY))
            .set("stroke", color.as_str())
            .set("stroke-width", fmt_num(stroke_width))
    }
}

impl LabelPrimitive {
    fn render_svg(&self) -> Text {
        Text::new(self.content.as_str())
            .set("x", fmt_num(self.at.x()))
            .set("y", fmt_num(self.at.y()))
            .set("fill", defaults::LABEL_COLOR)
            .set("font-family", defaults::LABEL_FONT_FAMILY)
            .set("font-size", fmt_num(defaults::LABEL_FONT_SIZE))
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
    }
}

impl Shape for MarkerPrimitive {
    fn anchor(&self) -> PixelPoint {
        self.center
    }

    fn id(&self) -> String {
        format!(
            "Marker_{}_{}",
            fmt_num(self.center.x()),
            fmt_num(self.center.y())
        )
    }

    fn render_svg(&self) -> Element {
        let mut group = Group::new().set("id", self.id());
        for stroke in &self.strokes {
            group = group.add(stroke.render_svg(&self.color, self.stroke_width));
        }
        if let Some(label) = &self.label {
            group = group.add(label.render_svg());
        }
        group.into()
    }
}

// ============================================================================
// Shape Enum
// ============================================================================

/// Uniform storage for everything a document can hold
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    Cell(CellPrimitive),
    Marker(MarkerPrimitive),
}

impl ShapeEnum {
    pub fn as_cell(&self) -> Option<&CellPrimitive> {
        match self {
            ShapeEnum::Cell(cell) => Some(cell),
            ShapeEnum::Marker(_) => None,
        }
    }

    pub fn as_marker(&self) -> Option<&MarkerPrimitive> {
        match self {
            ShapeEnum::Marker(marker) => Some(marker),
            ShapeEnum::Cell(_) => None,
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, ShapeEnum::Cell(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(element: &Element, name: &str) -> String {
        element
            .get_attributes()
            .get(name)
            .map(|value| value.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn cell_carries_fixed_stroke_style() {
        let cell = build_cell(64.0, 32.0, 32.0, Color::from("#cececf"));
        let element = cell.render_svg();
        assert_eq!(element.get_name(), "rect");
        assert_eq!(attr(&element, "x"), "64");
        assert_eq!(attr(&element, "y"), "32");
        assert_eq!(attr(&element, "width"), "32");
        assert_eq!(attr(&element, "height"), "32");
        assert_eq!(attr(&element, "fill"), "#cececf");
        assert_eq!(attr(&element, "stroke"), "#000000");
        assert_eq!(attr(&element, "stroke-width"), "1");
        assert_eq!(attr(&element, "stroke-dasharray"), "1 2");
        assert_eq!(attr(&element, "opacity"), "1");
        assert_eq!(attr(&element, "fill-opacity"), "1");
        assert_eq!(attr(&element, "transform"), "matrix(1, 0, 0, 1, 0, 0)");
        assert_eq!(attr(&element, "id"), "Rectangle_64_32");
    }

    #[test]
    fn marker_strokes_carry_color_and_weight() {
        let marker = build_marker(100.0, 50.0, 24.0, Color::from("#0022ff"), 4.0, None);
        let line = Element::from(marker.strokes[1].render_svg(&marker.color, marker.stroke_width));
        assert_eq!(line.get_name(), "line");
        assert_eq!(attr(&line, "x1"), "112");
        assert_eq!(attr(&line, "y1"), "38");
        assert_eq!(attr(&line, "x2"), "88");
        assert_eq!(attr(&line, "y2"), "62");
        assert_eq!(attr(&line, "stroke"), "#0022ff");
        assert_eq!(attr(&line, "stroke-width"), "4");
        assert_eq!(attr(&line, "opacity"), "1");
    }

    #[test]
    fn label_text_style() {
        let marker = build_marker(16.0, 24.0, 24.0, Color::from("blue"), 4.0, Some("A & B"));
        let text = Element::from(marker.label.as_ref().unwrap().render_svg());
        assert_eq!(text.get_name(), "text");
        assert_eq!(attr(&text, "x"), "16");
        assert_eq!(attr(&text, "y"), "24");
        assert_eq!(attr(&text, "fill"), "#000000");
        assert_eq!(attr(&text, "font-family"), "sans-serif");
        assert_eq!(attr(&text, "font-size"), "10");
        assert_eq!(attr(&text, "text-anchor"), "middle");
        assert_eq!(attr(&text, "dominant-baseline"), "middle");
        assert_eq!(text.get_children().len(), 1);
    }

    #[test]
    fn negative_cell_size_is_accepted() {
        let cell = build_cell(0.0, 0.0, -8.0, Color::from("red"));
        assert_eq!(cell.size, -8.0);
        assert_eq!(attr(&cell.render_svg(), "width"), "-8");
    }

    #[test]
    fn marker_diagonals_span_the_square() {
        let marker = build_marker(100.0, 50.0, 24.0, Color::from("#ff0000"), 4.0, None);
        assert_eq!(marker.strokes[0].from, PixelPoint::new(88.0, 38.0));
        assert_eq!(marker.strokes[0].to, PixelPoint::new(112.0, 62.0));
        assert_eq!(marker.strokes[1].from, PixelPoint::new(112.0, 38.0));
        assert_eq!(marker.strokes[1].to, PixelPoint::new(88.0, 62.0));
        assert_eq!(marker.id(), "Marker_100_50");
    }

    #[test]
    fn unlabeled_markers_have_no_text() {
        let none = build_marker(0.0, 0.0, 24.0, Color::from("blue"), 4.0, None);
        let empty = build_marker(0.0, 0.0, 24.0, Color::from("blue"), 4.0, Some(""));
        assert!(none.label.is_none());
        assert!(empty.label.is_none());
        assert_eq!(empty.render_svg().get_children().len(), 2);
    }

    #[test]
    fn labeled_marker_renders_centered_text() {
        let marker = build_marker(16.0, 16.0, 24.0, Color::from("blue"), 4.0, Some("A"));
        let group = marker.render_svg();
        assert_eq!(group.get_name(), "g");
        assert_eq!(group.get_children().len(), 3);
        let label = marker.label.as_ref().unwrap();
        assert_eq!(label.at, PixelPoint::new(16.0, 16.0));
        assert_eq!(label.content, "A");
    }

    #[test]
    fn enum_dispatches_to_variant() {
        let shape: ShapeEnum = build_cell(1.0, 2.0, 3.0, Color::from("red")).into();
        assert!(shape.is_cell());
        assert_eq!(shape.anchor(), PixelPoint::new(1.0, 2.0));
        assert!(shape.as_marker().is_none());
    }
}
