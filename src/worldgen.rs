//! Small noise-based terrain source for the demo world.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use hollow_blocks::Voxel;
use hollow_chunk::{ChunkBuf, ChunkCoord};
use serde::Deserialize;

pub const GRASS: u8 = 1;
pub const DIRT: u8 = 2;
pub const STONE: u8 = 3;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: i32,
    pub frequency: f32,
    /// Terrain floor and ceiling as fractions of world height.
    pub min_y_ratio: f32,
    pub max_y_ratio: f32,
    pub topsoil_thickness: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            frequency: 0.02,
            min_y_ratio: 0.15,
            max_y_ratio: 0.70,
            topsoil_thickness: 3,
        }
    }
}

pub struct WorldGen {
    terrain: FastNoiseLite,
    cfg: WorldGenConfig,
}

impl WorldGen {
    pub fn new(cfg: WorldGenConfig) -> Self {
        let mut terrain = FastNoiseLite::with_seed(cfg.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(cfg.frequency));
        Self { terrain, cfg }
    }

    /// Surface height in voxels at a world column.
    pub fn height_at(&self, wx: i32, wz: i32, world_height: usize) -> i32 {
        let n = self.terrain.get_noise_2d(wx as f32, wz as f32);
        let t = (n + 1.0) * 0.5;
        let min = self.cfg.min_y_ratio * world_height as f32;
        let max = self.cfg.max_y_ratio * world_height as f32;
        (min + t * (max - min)).floor() as i32
    }

    /// Fills one chunk from the heightmap: stone body, a dirt band, and a
    /// grass cap where the surface falls inside this chunk.
    pub fn generate_chunk(&self, coord: ChunkCoord, size: usize, world_height: usize) -> ChunkBuf {
        let mut buf = ChunkBuf::empty(coord, size);
        let base_x = coord.cx * size as i32;
        let base_y = coord.cy * size as i32;
        let base_z = coord.cz * size as i32;
        for z in 0..size {
            for x in 0..size {
                let surface = self.height_at(base_x + x as i32, base_z + z as i32, world_height);
                for y in 0..size {
                    let wy = base_y + y as i32;
                    if wy > surface {
                        break;
                    }
                    let depth = (surface - wy) as usize;
                    let id = if depth == 0 {
                        GRASS
                    } else if depth <= self.cfg.topsoil_thickness {
                        DIRT
                    } else {
                        STONE
                    };
                    buf.set_local(x, y, z, Voxel::new(id));
                }
            }
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_stay_in_configured_band() {
        let r#gen = WorldGen::new(WorldGenConfig::default());
        for wx in -50..50 {
            for wz in -50..50 {
                let h = r#gen.height_at(wx * 7, wz * 7, 64);
                assert!(h >= 9 && h <= 45, "height {h} out of band");
            }
        }
    }

    #[test]
    fn surface_is_grass_over_dirt() {
        let r#gen = WorldGen::new(WorldGenConfig::default());
        let buf = r#gen.generate_chunk(ChunkCoord { cx: 0, cy: 0, cz: 0 }, 16, 16);
        for z in 0..16 {
            for x in 0..16 {
                let surface = r#gen.height_at(x as i32, z as i32, 16);
                if (0..16).contains(&surface) {
                    assert_eq!(buf.get_local(x, surface as usize, z).id, GRASS);
                    if surface > 0 {
                        assert_eq!(buf.get_local(x, surface as usize - 1, z).id, DIRT);
                    }
                }
            }
        }
    }
}
