//! Default sizes, colors and styling (pixels unless noted)

pub const TILE_SIZE: f64 = 32.0;
pub const CHUNK_SIZE: u32 = 20;
pub const CHUNK_COUNT_X: u32 = 3;
pub const CHUNK_COUNT_Y: u32 = 3;

pub const CHUNK_COLOR: &str = "#a89ea9";
pub const CHUNK_COLOR_ALT: &str = "#8e98a5";
pub const CHUNK_BORDER_COLOR: &str = "#cececf";

pub const CELL_STROKE: &str = "#000000";
pub const CELL_STROKE_WIDTH: f64 = 1.0;
pub const CELL_DASHARRAY: &str = "1 2";
pub const CELL_TRANSFORM: &str = "matrix(1, 0, 0, 1, 0, 0)";

/// Marker side as a fraction of the tile size
pub const MARKER_SCALE: f64 = 0.75;
pub const MARKER_STROKE_WIDTH: f64 = 4.0;
pub const MARKER_OPACITY: f64 = 1.0;

pub const LABEL_COLOR: &str = "#000000";
pub const LABEL_FONT_FAMILY: &str = "sans-serif";
pub const LABEL_FONT_SIZE: f64 = 10.0;

/// Marker color when a scene does not give one
pub const MARKER_COLOR: &str = "#000000";
