pub mod atlas;
pub mod chunk;
pub mod config;
pub mod density;
pub mod edges;
pub mod error;
pub mod marching_squares;
pub mod mesh_data;
pub mod prelude;
pub mod tools;
pub mod world;

pub use config::{get_config, reload_config};
