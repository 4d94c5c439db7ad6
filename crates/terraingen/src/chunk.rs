use crate::atlas::UvRect;
use crate::density::DensityField;
use crate::edges::{Edge, merge_edges};
use crate::marching_squares;
use crate::mesh_data::MeshData;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer position of a chunk in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk whose cells contain `world_pos`.
    pub fn containing(world_pos: Vec2, chunk_size: u32) -> Self {
        let cell = (world_pos / chunk_size as f32).floor();
        Self::new(cell.x as i32, cell.y as i32)
    }

    pub fn origin(self, chunk_size: u32) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32) * chunk_size as f32
    }
}

/// Square grid of solid/empty samples, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGrid {
    nodes_per_axis: usize,
    nodes: Vec<bool>,
}

impl NodeGrid {
    /// An all-empty grid covering `cells_per_axis` cells, i.e. `cells_per_axis + 1` nodes per axis.
    pub fn new(cells_per_axis: usize) -> Self {
        let nodes_per_axis = cells_per_axis + 1;
        Self {
            nodes_per_axis,
            nodes: vec![false; nodes_per_axis * nodes_per_axis],
        }
    }

    pub fn filled(cells_per_axis: usize) -> Self {
        let mut grid = Self::new(cells_per_axis);
        grid.nodes.fill(true);
        grid
    }

    pub fn nodes_per_axis(&self) -> usize {
        self.nodes_per_axis
    }

    pub fn cells_per_axis(&self) -> usize {
        self.nodes_per_axis - 1
    }

    /// Out-of-range nodes read as empty.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.nodes[i])
    }

    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if let Some(i) = self.index(x, y) {
            self.nodes[i] = solid;
        }
    }

    pub fn solid_count(&self) -> usize {
        self.nodes.iter().filter(|&&solid| solid).count()
    }

    pub fn all_empty(&self) -> bool {
        !self.nodes.contains(&true)
    }

    /// Clear every node within `radius` of `center`. Returns whether any node flipped.
    ///
    /// Only the nodes inside the disk's bounding box are visited.
    pub fn clear_disk(&mut self, center: Vec2, radius: f32) -> bool {
        if !center.is_finite() || radius.is_nan() || radius < 0.0 {
            return false;
        }
        let last = self.cells_per_axis() as f32;
        let min = (center - Vec2::splat(radius)).ceil().max(Vec2::ZERO);
        let max = (center + Vec2::splat(radius)).floor().min(Vec2::splat(last));
        if min.x > max.x || min.y > max.y {
            return false;
        }

        let radius_squared = radius * radius;
        let mut changed = false;
        for y in min.y as usize..=max.y as usize {
            for x in min.x as usize..=max.x as usize {
                let offset = Vec2::new(x as f32, y as f32) - center;
                if offset.length_squared() > radius_squared {
                    continue;
                }
                let i = y * self.nodes_per_axis + x;
                if self.nodes[i] {
                    self.nodes[i] = false;
                    changed = true;
                }
            }
        }
        changed
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.nodes_per_axis && y < self.nodes_per_axis).then(|| y * self.nodes_per_axis + x)
    }
}

/// One square piece of terrain: its node grid plus the geometry derived from it.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    origin: Vec2,
    size: u32,
    nodes: NodeGrid,
    mesh: MeshData,
    edges: Vec<Edge>,
    colliders: Vec<Vec<Vec2>>,
    active: bool,
    /// Bumped on every rebuild so renderers can tell stale meshes apart.
    revision: u64,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, chunk_size: u32) -> Self {
        Self {
            coord,
            origin: coord.origin(chunk_size),
            size: chunk_size,
            nodes: NodeGrid::new(chunk_size as usize),
            mesh: MeshData::default(),
            edges: Vec::new(),
            colliders: Vec::new(),
            active: false,
            revision: 0,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn nodes(&self) -> &NodeGrid {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeGrid {
        &mut self.nodes
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Collision polylines in chunk-local space.
    pub fn colliders(&self) -> &[Vec<Vec2>] {
        &self.colliders
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sample the density field at every node and threshold it.
    pub fn populate(&mut self, field: &DensityField, threshold: f32) {
        let n = self.nodes.nodes_per_axis();
        for y in 0..n {
            for x in 0..n {
                let density = field.density(self.origin.x + x as f32, self.origin.y + y as f32);
                self.nodes.set(x, y, density > threshold);
            }
        }
    }

    /// Carve a disk given in chunk-local coordinates. Does not rebuild geometry.
    pub fn destroy_in_radius(&mut self, center_local: Vec2, radius: f32) -> bool {
        self.nodes.clear_disk(center_local, radius)
    }

    /// Re-triangulate the node grid and re-merge the collider paths.
    pub fn rebuild(&mut self, uv_rect: UvRect) {
        let geometry = marching_squares::triangulate(&self.nodes, uv_rect);
        self.colliders = merge_edges(&geometry.edges)
            .into_iter()
            .filter(|path| path.len() >= 2)
            .collect();
        self.mesh = geometry.mesh;
        self.edges = geometry.edges;
        self.revision += 1;
    }

    pub fn to_local(&self, world_pos: Vec2) -> Vec2 {
        world_pos - self.origin
    }

    /// Distance from `world_pos` to this chunk's square, 0 inside it.
    pub fn distance_to(&self, world_pos: Vec2) -> f32 {
        let max = self.origin + Vec2::splat(self.size as f32);
        let nearest = world_pos.clamp(self.origin, max);
        world_pos.distance(nearest)
    }

    /// Solidity of the node nearest to a chunk-local position.
    pub fn is_solid_at_local(&self, local: Vec2) -> bool {
        let last = self.size as f32;
        let node = local.round().clamp(Vec2::ZERO, Vec2::splat(last));
        self.nodes.get(node.x as usize, node.y as usize)
    }
}
