use hollow_blocks::Voxel;
use hollow_chunk::ChunkBuf;

use crate::error::MeshError;
use crate::face::{ALL_DIRS, FaceDir};

/// Borrowed views of the six adjacent chunk buffers, indexed by [`FaceDir`].
/// An absent neighbor reads as air, so boundary faces stay visible until
/// the neighbor arrives.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    slots: [Option<&'a ChunkBuf>; 6],
}

impl<'a> ChunkNeighbors<'a> {
    pub fn new() -> Self {
        Self { slots: [None; 6] }
    }

    pub fn with(mut self, dir: FaceDir, buf: &'a ChunkBuf) -> Self {
        self.slots[dir.index()] = Some(buf);
        self
    }

    pub fn set(&mut self, dir: FaceDir, buf: &'a ChunkBuf) {
        self.slots[dir.index()] = Some(buf);
    }

    #[inline]
    pub fn get(&self, dir: FaceDir) -> Option<&'a ChunkBuf> {
        self.slots[dir.index()]
    }

    /// Every present neighbor must match the center chunk's edge length.
    pub fn validate(&self, size: usize) -> Result<(), MeshError> {
        for dir in ALL_DIRS {
            if let Some(buf) = self.slots[dir.index()]
                && buf.size != size
            {
                return Err(MeshError::NeighborSizeMismatch {
                    dir,
                    expected: size,
                    actual: buf.size,
                });
            }
        }
        Ok(())
    }

    /// Reads the voxel at possibly out-of-range local coordinates. A
    /// coordinate one step past an edge is mirrored into the adjacent
    /// chunk; a missing adjacent chunk yields air.
    #[inline]
    pub fn sample(&self, center: &ChunkBuf, x: i32, y: i32, z: i32) -> Voxel {
        let size = center.size as i32;
        if x < 0 {
            return self.edge(FaceDir::Left, (size - 1) as usize, y as usize, z as usize);
        }
        if x >= size {
            return self.edge(FaceDir::Right, 0, y as usize, z as usize);
        }
        if y < 0 {
            return self.edge(FaceDir::Bottom, x as usize, (size - 1) as usize, z as usize);
        }
        if y >= size {
            return self.edge(FaceDir::Top, x as usize, 0, z as usize);
        }
        if z < 0 {
            return self.edge(FaceDir::Back, x as usize, y as usize, (size - 1) as usize);
        }
        if z >= size {
            return self.edge(FaceDir::Front, x as usize, y as usize, 0);
        }
        center.get_local(x as usize, y as usize, z as usize)
    }

    #[inline]
    fn edge(&self, dir: FaceDir, x: usize, y: usize, z: usize) -> Voxel {
        match self.slots[dir.index()] {
            Some(buf) => buf.get_local(x, y, z),
            None => Voxel::AIR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hollow_chunk::ChunkCoord;

    fn filled(v: Voxel) -> ChunkBuf {
        ChunkBuf::filled(ChunkCoord { cx: 0, cy: 0, cz: 0 }, 4, v)
    }

    #[test]
    fn absent_neighbor_reads_air() {
        let center = filled(Voxel::new(1));
        let n = ChunkNeighbors::new();
        assert!(n.sample(&center, -1, 0, 0).is_air());
        assert!(n.sample(&center, 0, 4, 0).is_air());
    }

    #[test]
    fn mirror_lookup_lands_on_far_plane() {
        let center = filled(Voxel::AIR);
        let mut left = filled(Voxel::AIR);
        left.set_local(3, 1, 2, Voxel::new(7));
        let n = ChunkNeighbors::new().with(FaceDir::Left, &left);
        assert_eq!(n.sample(&center, -1, 1, 2).id, 7);
        assert!(n.sample(&center, -1, 0, 0).is_air());
    }

    #[test]
    fn size_mismatch_rejected() {
        let other = ChunkBuf::filled(ChunkCoord { cx: 1, cy: 0, cz: 0 }, 8, Voxel::AIR);
        let n = ChunkNeighbors::new().with(FaceDir::Right, &other);
        assert!(n.validate(4).is_err());
        assert!(n.validate(8).is_ok());
    }
}
