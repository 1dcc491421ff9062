//! Rendering of formation grids
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, colors and styling
//! - `shapes`: Cell and marker primitives
//! - `grid`: Grid configuration and the cell composer
//! - `svg`: SVG generation and output

pub mod defaults;
pub mod grid;
pub mod shapes;
pub mod svg;

pub use grid::{GridColors, GridConfig, TileKind, compose_grid};
pub use shapes::{CellPrimitive, MarkerPrimitive, Shape, ShapeEnum, build_cell, build_marker};

use crate::formation::Marker;

/// A fully assembled drawing: grid cells first, then markers, plus the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    width: f64,
    height: f64,
    primitives: Vec<ShapeEnum>,
}

impl Document {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    fn push(&mut self, shape: impl Into<ShapeEnum>) {
        self.primitives.push(shape.into());
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(min_x, min_y, width, height)`
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        (0.0, 0.0, self.width, self.height)
    }

    /// Every primitive in draw order
    pub fn primitives(&self) -> &[ShapeEnum] {
        &self.primitives
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellPrimitive> {
        self.primitives.iter().filter_map(ShapeEnum::as_cell)
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerPrimitive> {
        self.primitives.iter().filter_map(ShapeEnum::as_marker)
    }
}

/// Assemble the grid and the markers into one document.
///
/// Marker positions are in tiles; each is scaled to pixels and drawn at three
/// quarters of a tile. Markers keep their input order and follow every cell.
pub fn assemble(config: &GridConfig, markers: &[Marker]) -> Document {
    let mut document = Document::new(config.width(), config.height());

    for cell in compose_grid(config) {
        document.push(cell);
    }

    let scaler = config.scaler();
    let marker_size = config.tile_size() * defaults::MARKER_SCALE;
    for marker in markers {
        let center = scaler.px(marker.position);
        document.push(build_marker(
            center.x(),
            center.y(),
            marker_size,
            marker.color.clone(),
            defaults::MARKER_STROKE_WIDTH,
            marker.label.as_deref(),
        ));
    }

    crate::log::debug!(
        primitives = document.primitives.len(),
        markers = markers.len(),
        "assembled document"
    );

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PixelPoint, TilePoint};

    fn marker(x: f64, y: f64, label: Option<&str>) -> Marker {
        Marker {
            position: TilePoint::new(x, y),
            color: Color::from("#ff0000"),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn markers_follow_every_cell() {
        let config = GridConfig::new(10.0, 2, 2, 1, GridColors::default()).unwrap();
        let document = assemble(&config, &[marker(1.0, 1.0, None), marker(0.5, 0.5, Some("A"))]);

        let primitives = document.primitives();
        assert_eq!(primitives.len(), 8 + 2);
        let last_cell = primitives.iter().rposition(ShapeEnum::is_cell).unwrap();
        let first_marker = primitives.iter().position(|p| !p.is_cell()).unwrap();
        assert!(last_cell < first_marker);
    }

    #[test]
    fn markers_are_scaled_to_pixels() {
        let config = GridConfig::default();
        let document = assemble(&config, &[marker(30.0, 30.0, Some("A")), marker(1.5, 2.0, None)]);

        let markers: Vec<_> = document.markers().collect();
        assert_eq!(markers[0].center, PixelPoint::new(960.0, 960.0));
        assert_eq!(markers[1].center, PixelPoint::new(48.0, 64.0));
        // 3/4 of a 32px tile
        assert_eq!(markers[0].strokes[0].from, PixelPoint::new(948.0, 948.0));
        assert_eq!(markers[0].stroke_width, defaults::MARKER_STROKE_WIDTH);
        assert_eq!(markers[0].label.as_ref().unwrap().content, "A");
    }

    #[test]
    fn viewport_matches_grid() {
        let config = GridConfig::new(16.0, 5, 4, 2, GridColors::default()).unwrap();
        let document = assemble(&config, &[]);
        assert_eq!(document.view_box(), (0.0, 0.0, 320.0, 160.0));
        assert_eq!(document.cells().count(), 4 * 2 * 5 * 5);
        assert_eq!(document.markers().count(), 0);
    }
}
