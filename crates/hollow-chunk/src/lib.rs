//! Chunk voxel buffer and chunk-grid addressing.
#![forbid(unsafe_code)]

use hollow_blocks::Voxel;

/// Address of a chunk in the sparse chunk grid (chunk units, not voxels).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }
}

/// A cube of `size^3` voxels, flat-indexed as `x + size * (y + size * z)`.
#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub size: usize,
    pub voxels: Vec<Voxel>,
}

impl ChunkBuf {
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.size * (y + self.size * z)
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, v: Voxel) {
        let i = self.idx(x, y, z);
        self.voxels[i] = v;
    }

    /// Builds a chunk from an existing voxel vector; a short or long vector is
    /// padded/truncated to `size^3` with air.
    pub fn from_voxels_local(coord: ChunkCoord, size: usize, voxels: Vec<Voxel>) -> Self {
        let mut v = voxels;
        let expect = size * size * size;
        if v.len() != expect {
            v.resize(expect, Voxel::AIR);
        }
        ChunkBuf {
            coord,
            size,
            voxels: v,
        }
    }

    /// A chunk with every cell set to the same voxel.
    pub fn filled(coord: ChunkCoord, size: usize, v: Voxel) -> Self {
        ChunkBuf {
            coord,
            size,
            voxels: vec![v; size * size * size],
        }
    }

    pub fn empty(coord: ChunkCoord, size: usize) -> Self {
        Self::filled(coord, size, Voxel::AIR)
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.size * self.size * self.size
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.voxels.iter().any(|v| !v.is_air())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }

    pub fn occupancy(&self) -> ChunkOccupancy {
        if self.has_non_air() {
            ChunkOccupancy::Populated
        } else {
            ChunkOccupancy::Empty
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, ChunkOccupancy::Empty)
    }

    #[inline]
    pub fn has_blocks(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }
}
