use crate::atlas::{TileAtlas, UvRect};
use crate::chunk::{Chunk, ChunkCoord};
use crate::config::{TerrainGenConfig, WorldConfig, validate_threshold};
use crate::density::DensityField;
use crate::error::ConfigError;
use glam::Vec2;
use std::collections::{HashMap, HashSet};

/// Chunks whose active flag flipped during one [`TerrainWorld::update_active_chunks`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationChanges {
    pub activated: Vec<ChunkCoord>,
    pub deactivated: Vec<ChunkCoord>,
}

impl ActivationChanges {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainStats {
    pub chunks: usize,
    pub active_chunks: usize,
    pub solid_nodes: usize,
    pub triangles: usize,
    pub collider_paths: usize,
}

/// The whole destructible terrain: a chunk index keyed by grid coordinate.
///
/// Built once by [`TerrainWorld::generate`]; afterwards chunks are only edited in place and
/// toggled active, never added or removed.
#[derive(Debug, Clone)]
pub struct TerrainWorld {
    config: WorldConfig,
    field: DensityField,
    uv_rect: UvRect,
    chunks: HashMap<ChunkCoord, Chunk>,
    active: HashSet<ChunkCoord>,
    deactivate_outside: bool,
}

impl TerrainWorld {
    /// Validate the configuration and set up an empty index. Call [`Self::generate`] to fill it.
    pub fn new(config: &TerrainGenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = DensityField::new(&config.world, &config.noise.layers)?;
        let atlas = TileAtlas::from_config(&config.atlas)?;
        Ok(Self {
            config: config.world,
            field,
            uv_rect: atlas.uv_rect(config.atlas.tile_index),
            chunks: HashMap::new(),
            active: HashSet::new(),
            deactivate_outside: config.streaming.deactivate_outside,
        })
    }

    pub fn from_config(config: &TerrainGenConfig) -> Result<Self, ConfigError> {
        let mut world = Self::new(config)?;
        world.generate();
        Ok(world)
    }

    /// (Re)build every chunk from the density field. All chunks start inactive.
    pub fn generate(&mut self) {
        self.chunks.clear();
        self.active.clear();

        let threshold = self.config.terrain_threshold;
        for y in 0..self.config.world_height_chunks as i32 {
            for x in 0..self.config.world_width_chunks as i32 {
                let coord = ChunkCoord::new(x, y);
                let mut chunk = Chunk::new(coord, self.config.chunk_size);
                chunk.populate(&self.field, threshold);
                chunk.rebuild(self.uv_rect);
                self.chunks.insert(coord, chunk);
            }
        }

        let stats = self.stats();
        log::info!(
            "Generated terrain: {} chunks ({}x{}), {} solid nodes, {} triangles, {} collider paths",
            stats.chunks,
            self.config.world_width_chunks,
            self.config.world_height_chunks,
            stats.solid_nodes,
            stats.triangles,
            stats.collider_paths
        );
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Change the solidity threshold. Existing chunks keep their nodes until the next
    /// [`Self::generate`].
    pub fn set_terrain_threshold(&mut self, threshold: f32) -> Result<(), ConfigError> {
        validate_threshold(threshold)?;
        self.config.terrain_threshold = threshold;
        Ok(())
    }

    pub fn set_deactivate_outside(&mut self, deactivate_outside: bool) {
        self.deactivate_outside = deactivate_outside;
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.config.world_width(), self.config.world_height())
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn active_chunks(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.active.iter().copied()
    }

    /// Chunks whose square touches the disk of `radius` around `point`.
    pub fn chunks_intersecting(&self, point: Vec2, radius: f32) -> Vec<ChunkCoord> {
        self.chunks_within(point, radius)
    }

    /// Carve a disk out of the terrain and rebuild the chunks that actually changed.
    ///
    /// Candidates are all chunks within `radius + chunk_size` of `world_pos`; a candidate
    /// whose nodes all lie outside the disk is left untouched. Returns the rebuilt chunks.
    pub fn destroy_in_radius(&mut self, world_pos: Vec2, radius: f32) -> Vec<ChunkCoord> {
        let reach = radius + self.config.chunk_size as f32;
        let candidates = self.chunks_within(world_pos, reach);

        let mut rebuilt = Vec::new();
        for coord in candidates {
            let Some(chunk) = self.chunks.get_mut(&coord) else {
                continue;
            };
            let local = chunk.to_local(world_pos);
            if chunk.destroy_in_radius(local, radius) {
                chunk.rebuild(self.uv_rect);
                rebuilt.push(coord);
            }
        }

        if !rebuilt.is_empty() {
            log::debug!(
                "Destroyed terrain at ({:.1}, {:.1}) r={radius:.2}, rebuilt {} chunks",
                world_pos.x,
                world_pos.y,
                rebuilt.len()
            );
        }
        rebuilt
    }

    /// Activate the `(2 * view_distance + 1)²` window of chunks around the viewer.
    ///
    /// When deactivation is enabled, previously active chunks outside the window are
    /// deactivated; otherwise the active set only grows. A non-finite viewer changes nothing.
    pub fn update_active_chunks(&mut self, viewer: Vec2, view_distance: u32) -> ActivationChanges {
        if !viewer.is_finite() {
            return ActivationChanges::default();
        }
        let center = ChunkCoord::containing(viewer, self.config.chunk_size);
        let window: HashSet<ChunkCoord> = activation_window(
            center,
            view_distance,
            self.config.world_width_chunks,
            self.config.world_height_chunks,
        )
        .filter(|coord| self.chunks.contains_key(coord))
        .collect();

        let mut changes = ActivationChanges::default();
        for &coord in &window {
            if self.active.insert(coord) {
                if let Some(chunk) = self.chunks.get_mut(&coord) {
                    chunk.set_active(true);
                }
                changes.activated.push(coord);
            }
        }

        if self.deactivate_outside {
            let stale: Vec<ChunkCoord> = self.active.difference(&window).copied().collect();
            for coord in stale {
                self.active.remove(&coord);
                if let Some(chunk) = self.chunks.get_mut(&coord) {
                    chunk.set_active(false);
                }
                changes.deactivated.push(coord);
            }
        }

        changes.activated.sort();
        changes.deactivated.sort();
        changes
    }

    /// Whether the node nearest to `world_pos` is solid. Everything outside the world is rock.
    pub fn is_solid_at(&self, world_pos: Vec2) -> bool {
        let size = self.world_size();
        if !world_pos.is_finite()
            || world_pos.x < 0.0
            || world_pos.y < 0.0
            || world_pos.x > size.x
            || world_pos.y > size.y
        {
            return true;
        }
        let last = ChunkCoord::new(
            self.config.world_width_chunks as i32 - 1,
            self.config.world_height_chunks as i32 - 1,
        );
        let coord = ChunkCoord::containing(world_pos, self.config.chunk_size);
        let coord = ChunkCoord::new(coord.x.min(last.x), coord.y.min(last.y));
        self.chunks
            .get(&coord)
            .is_none_or(|chunk| chunk.is_solid_at_local(chunk.to_local(world_pos)))
    }

    /// Closest empty node to `near`, searching square rings of up to `search_radius` nodes.
    pub fn find_open_position(&self, near: Vec2, search_radius: u32) -> Option<Vec2> {
        let start = near.round();
        let radius = i32::try_from(search_radius).unwrap_or(i32::MAX);
        (0..=radius).find_map(|ring| {
            ring_offsets(ring)
                .map(|(dx, dy)| start + Vec2::new(dx as f32, dy as f32))
                .find(|&pos| !self.is_solid_at(pos))
        })
    }

    pub fn stats(&self) -> TerrainStats {
        self.chunks.values().fold(
            TerrainStats {
                active_chunks: self.active.len(),
                ..TerrainStats::default()
            },
            |mut stats, chunk| {
                stats.chunks += 1;
                stats.solid_nodes += chunk.nodes().solid_count();
                stats.triangles += chunk.mesh().triangle_count();
                stats.collider_paths += chunk.colliders().len();
                stats
            },
        )
    }

    /// Chunks of the index within `reach` of `point`, found by scanning only the chunk
    /// coordinates the disk's bounding box can overlap.
    fn chunks_within(&self, point: Vec2, reach: f32) -> Vec<ChunkCoord> {
        if !point.is_finite() || reach.is_nan() || reach < 0.0 {
            return Vec::new();
        }
        let size = self.config.chunk_size as f32;
        let Some((min_x, max_x)) =
            axis_range(point.x, reach, size, self.config.world_width_chunks)
        else {
            return Vec::new();
        };
        let Some((min_y, max_y)) =
            axis_range(point.y, reach, size, self.config.world_height_chunks)
        else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let coord = ChunkCoord::new(x, y);
                if self
                    .chunks
                    .get(&coord)
                    .is_some_and(|chunk| chunk.distance_to(point) <= reach)
                {
                    found.push(coord);
                }
            }
        }
        found
    }
}

/// Every chunk coordinate within `view_distance` of `center` on both axes, clipped to a
/// `width` x `height` grid of chunks. Empty when the window misses the grid.
pub fn activation_window(
    center: ChunkCoord,
    view_distance: u32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = ChunkCoord> {
    let (min_x, max_x) = window_span(center.x, view_distance, width);
    let (min_y, max_y) = window_span(center.y, view_distance, height);
    (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| ChunkCoord::new(x, y)))
}

/// Inclusive span `[center - reach, center + reach]` clipped to `[0, count)`, computed in
/// i64 so neither end can overflow.
fn window_span(center: i32, reach: u32, count: u32) -> (i32, i32) {
    let (center, reach) = (i64::from(center), i64::from(reach));
    let lo = (center - reach).max(0);
    let hi = (center + reach).min(i64::from(count) - 1);
    let clamp = |v: i64| v.clamp(-1, i64::from(i32::MAX)) as i32;
    (clamp(lo), clamp(hi))
}

/// Range of chunk indices along one axis whose closed span can lie within `reach` of
/// `center`. A point on a chunk border belongs to both neighbours.
fn axis_range(center: f32, reach: f32, chunk_size: f32, count: u32) -> Option<(i32, i32)> {
    let lo = (((center - reach) / chunk_size).ceil() - 1.0).max(0.0);
    let hi = ((center + reach) / chunk_size)
        .floor()
        .min(count as f32 - 1.0);
    (lo <= hi).then_some((lo as i32, hi as i32))
}

fn ring_offsets(ring: i32) -> impl Iterator<Item = (i32, i32)> {
    (-ring..=ring)
        .flat_map(move |dy| (-ring..=ring).map(move |dx| (dx, dy)))
        .filter(move |&(dx, dy)| dx.abs().max(dy.abs()) == ring)
}
