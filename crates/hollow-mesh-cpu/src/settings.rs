use hollow_geom::Vec3;
use serde::Deserialize;

/// Pipeline configuration. Every stage can be toggled independently; a
/// disabled visibility stage is simply skipped by the stage machine.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Voxels per chunk edge.
    pub chunk_size: usize,
    /// General boundary flood fill (exterior-reachable void detection).
    pub do_flood_fill: bool,
    /// Directional ray-walk visibility approximation.
    pub do_linear_flood_fill: bool,
    /// Skip faces whose across-face neighbor is an occluder.
    pub do_faces_occlusion: bool,
    /// Merge coplanar same-material faces into larger quads.
    pub do_greedy_meshing: bool,
    /// Drop quads whose normal points away from `viewer_position`.
    pub do_face_normal_check: bool,
    /// Upper bound on concurrently meshing chunks (consumed by the runtime).
    pub max_concurrent_builds: usize,
    /// Viewpoint for the facing filter, in the chunk's local voxel space.
    #[serde(skip)]
    pub viewer_position: Vec3,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            do_flood_fill: true,
            do_linear_flood_fill: true,
            do_faces_occlusion: true,
            do_greedy_meshing: true,
            do_face_normal_check: false,
            max_concurrent_builds: 8,
            viewer_position: Vec3::ZERO,
        }
    }
}

impl MeshSettings {
    #[inline]
    pub fn volume(&self) -> usize {
        self.chunk_size * self.chunk_size * self.chunk_size
    }
}
