use crate::config::AtlasConfig;
use crate::error::ConfigError;
use glam::Vec2;

/// Rectangle in texture space. `min` is the top-left corner, as image UVs grow downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    pub const FULL: UvRect = UvRect {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Map a point of the unit cell (y up) into this rect (v down).
    pub fn map(&self, local: Vec2) -> Vec2 {
        let size = self.size();
        Vec2::new(self.min.x + local.x * size.x, self.max.y - local.y * size.y)
    }
}

/// Uniform grid of equally sized tiles packed into one texture, indexed row-major from the
/// top-left tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAtlas {
    columns: u32,
    rows: u32,
}

impl TileAtlas {
    pub fn new(columns: u32, rows: u32) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyAtlas { columns, rows });
        }
        if columns.checked_mul(rows).is_none() {
            return Err(ConfigError::AtlasTooLarge { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    pub fn from_config(config: &AtlasConfig) -> Result<Self, ConfigError> {
        Self::new(config.columns, config.rows)
    }

    /// Never overflows: [`Self::new`] rejects grids whose tile count does not fit a `u32`.
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// UV rect of `tile_index`. Indices past the last tile wrap around.
    pub fn uv_rect(&self, tile_index: u32) -> UvRect {
        let index = tile_index % self.tile_count();
        let tile_size = Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32);
        let min = Vec2::new(
            (index % self.columns) as f32 * tile_size.x,
            (index / self.columns) as f32 * tile_size.y,
        );
        UvRect {
            min,
            max: min + tile_size,
        }
    }
}
