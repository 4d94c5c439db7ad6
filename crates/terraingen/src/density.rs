use crate::config::{NoiseLayer, WorldConfig, validate_layers};
use crate::error::ConfigError;
use noise::{NoiseFn, Perlin};

const NOISE_SEED: u32 = 0;

/// Scalar terrain density over world space, in `[0, 1]`.
///
/// Layers of Perlin noise are averaged into a base value, which is then pulled towards 1
/// (solid) inside a band of `edge_thickness` along the world border so the playable area is
/// always enclosed by rock.
#[derive(Debug, Clone)]
pub struct DensityField {
    perlin: Perlin,
    layers: Vec<NoiseLayer>,
    seed: f32,
    world_width: f32,
    world_height: f32,
    edge_thickness: f32,
}

impl DensityField {
    pub fn new(world: &WorldConfig, layers: &[NoiseLayer]) -> Result<Self, ConfigError> {
        world.validate()?;
        validate_layers(layers)?;
        Ok(Self {
            perlin: Perlin::new(NOISE_SEED),
            layers: layers.to_vec(),
            seed: world.seed,
            world_width: world.world_width(),
            world_height: world.world_height(),
            edge_thickness: world.edge_thickness,
        })
    }

    pub fn density(&self, x: f32, y: f32) -> f32 {
        lerp(1.0, self.base_noise(x, y), self.edge_weight(x, y)).clamp(0.0, 1.0)
    }

    /// Weighted sum of all layers before edge tapering.
    pub fn base_noise(&self, x: f32, y: f32) -> f32 {
        let weight = 1.0 / self.layers.len() as f32;
        self.layers
            .iter()
            .map(|layer| {
                let sample_x = x / layer.frequency / 2.0 + self.seed;
                let sample_y = y / layer.frequency + self.seed;
                let value = self.perlin.get([sample_x as f64, sample_y as f64]) as f32;
                to_unit_range(value) * layer.intensity * weight
            })
            .sum::<f32>()
            .clamp(0.0, 1.0)
    }

    /// 0 on (or outside) the world border, rising quadratically to 1 at `edge_thickness`.
    pub fn edge_weight(&self, x: f32, y: f32) -> f32 {
        let distance = self.distance_to_edge(x, y);
        if self.edge_thickness <= 0.0 {
            return if distance > 0.0 { 1.0 } else { 0.0 };
        }
        let t = inverse_lerp(self.edge_thickness, 0.0, distance).clamp(0.0, 1.0);
        let weight = 1.0 - t;
        weight * weight
    }

    /// Distance to the closest side of the world rectangle, negative outside it.
    pub fn distance_to_edge(&self, x: f32, y: f32) -> f32 {
        x.min(self.world_width - x)
            .min(y)
            .min(self.world_height - y)
    }
}

fn to_unit_range(value: f32) -> f32 {
    (value * 0.5 + 0.5).clamp(0.0, 1.0)
}

// Exact at both ends, so t = 0 yields `a` and t = 1 yields `b` bit for bit.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    (value - a) / (b - a)
}
