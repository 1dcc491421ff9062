//! Chunked tile grid: configuration and cell composition

use super::defaults;
use super::shapes::{CellPrimitive, build_cell};
use crate::errors::ConfigError;
use crate::types::{Color, TilePoint, TileScaler};

/// Fill colors used by the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridColors {
    pub interior: Color,
    /// Interior color for the rightmost chunk column
    pub alternate: Color,
    pub border: Color,
}

impl Default for GridColors {
    fn default() -> Self {
        Self {
            interior: Color::from(defaults::CHUNK_COLOR),
            alternate: Color::from(defaults::CHUNK_COLOR_ALT),
            border: Color::from(defaults::CHUNK_BORDER_COLOR),
        }
    }
}

/// Validated grid parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    scaler: TileScaler,
    chunk_size: u32,
    chunk_count_x: u32,
    chunk_count_y: u32,
    colors: GridColors,
}

impl GridConfig {
    /// Build a config, failing fast on parameters that cannot describe a grid
    pub fn new(
        tile_size: f64,
        chunk_size: u32,
        chunk_count_x: u32,
        chunk_count_y: u32,
        colors: GridColors,
    ) -> Result<Self, ConfigError> {
        let scaler = TileScaler::try_new(tile_size).map_err(|reason| {
            ConfigError::InvalidTileSize {
                value: tile_size,
                reason,
            }
        })?;
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize { value: chunk_size });
        }
        if chunk_count_x == 0 || chunk_count_y == 0 {
            return Err(ConfigError::InvalidChunkCount {
                x: chunk_count_x,
                y: chunk_count_y,
            });
        }
        let too_large = || ConfigError::GridTooLarge {
            chunk_size,
            x: chunk_count_x,
            y: chunk_count_y,
        };
        let tiles_x = chunk_count_x.checked_mul(chunk_size).ok_or_else(too_large)?;
        let tiles_y = chunk_count_y.checked_mul(chunk_size).ok_or_else(too_large)?;
        (tiles_x as usize)
            .checked_mul(tiles_y as usize)
            .ok_or_else(too_large)?;
        Ok(Self {
            scaler,
            chunk_size,
            chunk_count_x,
            chunk_count_y,
            colors,
        })
    }

    pub fn tile_size(&self) -> f64 {
        self.scaler.tile_size()
    }

    pub fn scaler(&self) -> TileScaler {
        self.scaler
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn chunk_count_x(&self) -> u32 {
        self.chunk_count_x
    }

    pub fn chunk_count_y(&self) -> u32 {
        self.chunk_count_y
    }

    pub fn colors(&self) -> &GridColors {
        &self.colors
    }

    /// Grid width in tiles
    pub fn tiles_x(&self) -> u32 {
        self.chunk_count_x * self.chunk_size
    }

    /// Grid height in tiles
    pub fn tiles_y(&self) -> u32 {
        self.chunk_count_y * self.chunk_size
    }

    /// Total width in pixels
    pub fn width(&self) -> f64 {
        self.scaler.len(self.tiles_x() as f64)
    }

    /// Total height in pixels
    pub fn height(&self) -> f64 {
        self.scaler.len(self.tiles_y() as f64)
    }

    /// Middle of the grid in tile units
    pub fn center(&self) -> TilePoint {
        TilePoint::new(self.tiles_x() as f64 / 2.0, self.tiles_y() as f64 / 2.0)
    }

    /// Number of cells the composer emits
    pub fn cell_count(&self) -> usize {
        self.tiles_x() as usize * self.tiles_y() as usize
    }

    /// Index of the rightmost chunk column
    pub fn last_chunk_column(&self) -> u32 {
        self.chunk_count_x - 1
    }

    /// Classify a tile by its chunk column and its position inside the chunk
    pub fn classify(&self, chunk_x: u32, local_x: u32, local_y: u32) -> TileKind {
        let edge = self.chunk_size - 1;
        let on_border = local_x == 0 || local_x == edge || local_y == 0 || local_y == edge;
        if on_border {
            TileKind::Border
        } else if chunk_x == self.last_chunk_column() {
            TileKind::AlternateInterior
        } else {
            TileKind::Interior
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            scaler: TileScaler::try_new(defaults::TILE_SIZE)
                .unwrap_or_else(|_| unreachable!("default tile size is positive")),
            chunk_size: defaults::CHUNK_SIZE,
            chunk_count_x: defaults::CHUNK_COUNT_X,
            chunk_count_y: defaults::CHUNK_COUNT_Y,
            colors: GridColors::default(),
        }
    }
}

/// Coloring class of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Border,
    Interior,
    AlternateInterior,
}

impl TileKind {
    pub fn color(self, colors: &GridColors) -> &Color {
        match self {
            TileKind::Border => &colors.border,
            TileKind::Interior => &colors.interior,
            TileKind::AlternateInterior => &colors.alternate,
        }
    }
}

/// Emit one cell per tile: chunk by chunk (x-major), then column by column
/// inside each chunk.
pub fn compose_grid(config: &GridConfig) -> Vec<CellPrimitive> {
    let mut cells = Vec::with_capacity(config.cell_count());
    let scaler = config.scaler();
    let chunk_size = config.chunk_size();

    for chunk_x in 0..config.chunk_count_x() {
        for chunk_y in 0..config.chunk_count_y() {
            for local_x in 0..chunk_size {
                for local_y in 0..chunk_size {
                    let tile = TilePoint::new(
                        (chunk_x * chunk_size + local_x) as f64,
                        (chunk_y * chunk_size + local_y) as f64,
                    );
                    let origin = scaler.px(tile);
                    let fill = config.classify(chunk_x, local_x, local_y).color(config.colors());
                    cells.push(build_cell(
                        origin.x(),
                        origin.y(),
                        scaler.tile_size(),
                        fill.clone(),
                    ));
                }
            }
        }
    }

    crate::log::debug!(
        cells = cells.len(),
        width = config.width(),
        height = config.height(),
        "composed grid"
    );

    cells
}
