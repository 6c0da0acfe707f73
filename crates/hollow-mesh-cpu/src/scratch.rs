use crate::mesh_build::MeshBuild;
use crate::quad::SquareFace;
use crate::render::RenderCell;
use crate::visit::VisitSet;

/// Reusable working memory for one mesh build. Pooling these across
/// builds keeps the per-chunk allocations out of the hot path.
#[derive(Default)]
pub struct BuildScratch {
    pub(crate) flood_visited: VisitSet,
    pub(crate) linear_visited: VisitSet,
    pub(crate) frontier: Vec<u32>,
    pub(crate) cells: Vec<RenderCell>,
    pub(crate) faces: Vec<SquareFace>,
    pub(crate) mesh: MeshBuild,
}

impl BuildScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffers for a given chunk volume.
    pub fn with_capacity(volume: usize) -> Self {
        let mut s = Self::default();
        s.flood_visited.reset(volume);
        s.linear_visited.reset(volume);
        s.cells.reserve(volume);
        s
    }

    /// Clears all buffers, keeping their allocations.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.cells.clear();
        self.faces.clear();
        self.mesh.clear_keep_capacity();
    }
}
