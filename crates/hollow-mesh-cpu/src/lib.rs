//! CPU chunk mesher: boundary-reachability visibility, neighbor-aware face
//! masks, single-pass greedy merging, and quad-to-buffer expansion.
#![forbid(unsafe_code)]

mod build;
mod constants;
mod error;
mod face;
mod mesh_build;
mod neighbors;
mod quad;
mod render;
mod scratch;
mod settings;
pub mod visibility;
mod visit;

pub use build::{BuildStage, build_chunk_mesh, build_chunk_mesh_with_scratch};
pub use error::MeshError;
pub use face::{ALL_DIRS, FaceDir};
pub use mesh_build::{ChunkMesh, MeshBuild};
pub use neighbors::ChunkNeighbors;
pub use quad::SquareFace;
pub use render::RenderCell;
pub use scratch::BuildScratch;
pub use settings::MeshSettings;
pub use visit::VisitSet;

use hollow_chunk::ChunkCoord;

/// Sink for finished chunk meshes. The engine layer implements this to hand
/// buffers to its renderer; the returned handle is opaque to the pipeline.
pub trait MeshUpload {
    type Handle;

    fn upload(&mut self, coord: ChunkCoord, mesh: &ChunkMesh) -> Self::Handle;
}
