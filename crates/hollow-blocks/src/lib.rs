//! Voxel, material, and atlas-lookup crate.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{AtlasLayout, MaterialCatalog};
pub use types::{AIR_ID, MaterialId, Voxel, VoxelFlags};
