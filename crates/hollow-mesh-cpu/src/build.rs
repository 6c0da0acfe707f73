//! Staged chunk build driver. A chunk advances through a fixed stage
//! order, each optional stage skipped when its setting is off, and the
//! whole pipeline runs to completion inside one call.

use hollow_blocks::{AtlasLayout, MaterialCatalog};
use hollow_chunk::ChunkBuf;

use crate::constants::MAX_CHUNK_SIZE;
use crate::error::MeshError;
use crate::mesh_build::ChunkMesh;
use crate::neighbors::ChunkNeighbors;
use crate::render::{build_render_cells, collect_faces};
use crate::scratch::BuildScratch;
use crate::settings::MeshSettings;
use crate::visibility::{flood_fill, linear_flood_fill};

/// Progress marker for one chunk build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStage {
    JustCreated,
    FloodFill,
    LinearFloodFill,
    RenderBlocks,
    Mesh,
    Ready,
}

impl BuildStage {
    /// Next stage under the given settings. Disabled stages are skipped,
    /// so the order is fixed but the path through it is not.
    pub fn next(self, settings: &MeshSettings) -> BuildStage {
        match self {
            BuildStage::JustCreated if settings.do_flood_fill => BuildStage::FloodFill,
            BuildStage::JustCreated | BuildStage::FloodFill if settings.do_linear_flood_fill => {
                BuildStage::LinearFloodFill
            }
            BuildStage::JustCreated | BuildStage::FloodFill | BuildStage::LinearFloodFill => {
                BuildStage::RenderBlocks
            }
            BuildStage::RenderBlocks => BuildStage::Mesh,
            BuildStage::Mesh | BuildStage::Ready => BuildStage::Ready,
        }
    }
}

/// Builds a chunk mesh with freshly allocated scratch buffers.
pub fn build_chunk_mesh(
    buf: &ChunkBuf,
    neighbors: &ChunkNeighbors<'_>,
    settings: &MeshSettings,
    catalog: &MaterialCatalog,
    atlas: &AtlasLayout,
) -> Result<ChunkMesh, MeshError> {
    let mut scratch = BuildScratch::with_capacity(buf.volume());
    build_chunk_mesh_with_scratch(buf, neighbors, settings, catalog, atlas, &mut scratch)
}

/// Builds a chunk mesh, reusing `scratch` for all intermediate state.
pub fn build_chunk_mesh_with_scratch(
    buf: &ChunkBuf,
    neighbors: &ChunkNeighbors<'_>,
    settings: &MeshSettings,
    catalog: &MaterialCatalog,
    atlas: &AtlasLayout,
    scratch: &mut BuildScratch,
) -> Result<ChunkMesh, MeshError> {
    if buf.size > MAX_CHUNK_SIZE {
        return Err(MeshError::ChunkTooLarge {
            size: buf.size,
            max: MAX_CHUNK_SIZE,
        });
    }
    if buf.size != settings.chunk_size || buf.voxels.len() != buf.volume() {
        return Err(MeshError::GridSizeMismatch {
            expected: settings.volume(),
            actual: buf.voxels.len(),
        });
    }
    neighbors.validate(buf.size)?;
    scratch.reset();

    let mut stage = BuildStage::JustCreated;
    loop {
        stage = stage.next(settings);
        match stage {
            BuildStage::JustCreated => unreachable!("no stage steps back to the start"),
            BuildStage::FloodFill => {
                flood_fill(buf, &mut scratch.flood_visited, &mut scratch.frontier);
            }
            BuildStage::LinearFloodFill => {
                linear_flood_fill(buf, &mut scratch.linear_visited);
            }
            BuildStage::RenderBlocks => {
                let flood = settings.do_flood_fill.then_some(&scratch.flood_visited);
                let linear = settings
                    .do_linear_flood_fill
                    .then_some(&scratch.linear_visited);
                build_render_cells(buf, neighbors, settings, flood, linear, &mut scratch.cells);
                collect_faces(buf, settings, &scratch.cells, &mut scratch.faces);
            }
            BuildStage::Mesh => {
                scratch.mesh.reserve_quads(scratch.faces.len());
                for face in &scratch.faces {
                    face.emit(
                        catalog.cell_of(face.material),
                        atlas.cell_width_uv,
                        atlas.cell_height_uv,
                        &mut scratch.mesh,
                    );
                }
            }
            BuildStage::Ready => break,
        }
    }

    Ok(ChunkMesh::from_build(buf.coord, &scratch.mesh))
}
