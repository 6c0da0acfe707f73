use hollow_chunk::ChunkCoord;
use hollow_geom::Aabb;

use crate::constants::{INDICES_PER_QUAD, VERTS_PER_QUAD};

/// Growable vertex/index buffers a build writes into. Reused across
/// builds via [`clear_keep_capacity`](MeshBuild::clear_keep_capacity).
#[derive(Clone, Debug, Default)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.uv.clear();
        self.idx.clear();
    }

    pub fn reserve_quads(&mut self, quads: usize) {
        self.pos.reserve(quads * VERTS_PER_QUAD * 3);
        self.uv.reserve(quads * VERTS_PER_QUAD * 2);
        self.idx.reserve(quads * INDICES_PER_QUAD);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    pub fn quad_count(&self) -> usize {
        self.idx.len() / INDICES_PER_QUAD
    }

    /// Appends four vertices and the two triangles (0,1,2) (0,2,3) over
    /// them. `corners` are in emit order, `uvs` in BL/BR/TR/TL order.
    pub fn push_quad(&mut self, corners: [[f32; 3]; 4], uvs: [[f32; 2]; 4]) {
        let base = self.vertex_count() as u32;
        for c in corners {
            self.pos.extend_from_slice(&c);
        }
        for t in uvs {
            self.uv.extend_from_slice(&t);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Finished geometry for one chunk, positioned in chunk-local space.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl ChunkMesh {
    pub fn from_build(coord: ChunkCoord, build: &MeshBuild) -> Self {
        Self {
            coord,
            positions: build.pos.clone(),
            uvs: build.uv.clone(),
            indices: build.idx.clone(),
            bounds: bounds_of(&build.pos),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / INDICES_PER_QUAD
    }
}

fn bounds_of(pos: &[f32]) -> Aabb {
    use hollow_geom::Vec3;
    let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
    if pos.is_empty() {
        return Aabb {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };
    }
    for v in pos.chunks_exact(3) {
        min.x = min.x.min(v[0]);
        min.y = min.y.min(v[1]);
        min.z = min.z.min(v[2]);
        max.x = max.x.max(v[0]);
        max.y = max.y.max(v[1]);
        max.z = max.z.max(v[2]);
    }
    Aabb { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_quad_indices_share_vertices() {
        let mut b = MeshBuild::new();
        b.push_quad(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
        b.push_quad(
            [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
        assert_eq!(b.vertex_count(), 8);
        assert_eq!(b.idx, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        b.clear_keep_capacity();
        assert_eq!(b.vertex_count(), 0);
        assert!(b.pos.capacity() >= 24);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut b = MeshBuild::new();
        b.push_quad(
            [[-1.0, 0.0, 2.0], [3.0, 0.0, 2.0], [3.0, 5.0, 2.0], [-1.0, 5.0, 2.0]],
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
        let m = ChunkMesh::from_build(ChunkCoord { cx: 0, cy: 0, cz: 0 }, &b);
        assert_eq!(m.bounds.min.x, -1.0);
        assert_eq!(m.bounds.max.y, 5.0);
        assert_eq!(m.bounds.max.z, 2.0);
    }
}
