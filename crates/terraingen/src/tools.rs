use rand::Rng;
use rand::distr::Uniform;

/// Seeds are noise-space offsets, so keep them small enough for f32 to stay precise.
const MAX_SEED: f32 = 10_000.0;
const MAX_SEED_CODE: u32 = 100_000_000;

/// A random eight digit code that can be shared to reproduce a world.
pub fn generate_seed_code() -> u32 {
    let mut rng = rand::rng();
    match Uniform::new(0u32, MAX_SEED_CODE) {
        Ok(range) => rng.sample(range),
        Err(_) => 0,
    }
}

/// Turn a seed code into a noise offset. Equal codes always give equal seeds.
pub fn seed_from_code(code: u32) -> f32 {
    let bits = splitmix64(code as u64);
    // top 24 bits fit an f32 mantissa exactly
    let unit = (bits >> 40) as f32 / (1u64 << 24) as f32;
    unit * MAX_SEED
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
