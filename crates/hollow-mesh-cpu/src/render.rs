//! Face-mask construction and greedy merging. One ascending row-major
//! pass both decides which faces exist and merges coplanar
//! same-material faces into rectangles; merging only ever mutates cells
//! at earlier indices, so the pass never revisits a cell.

use hollow_chunk::ChunkBuf;

use crate::face::{ALL_DIRS, FaceDir};
use crate::neighbors::ChunkNeighbors;
use crate::quad::SquareFace;
use crate::settings::MeshSettings;
use crate::visit::VisitSet;

/// Per-cell face state. `mask` holds one live bit per direction; `w`
/// and `h` count merged cells beyond the first along each direction's
/// width and height axes. Sized for chunk edges up to 256.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderCell {
    pub material: u8,
    pub mask: u8,
    pub w: [u8; 6],
    pub h: [u8; 6],
}

/// Step offset toward the previously processed cell along the merge
/// width axis for each direction.
const W_DELTA: [(i32, i32, i32); 6] = [
    (0, 0, -1), // Left
    (0, 0, -1), // Right
    (-1, 0, 0), // Bottom
    (-1, 0, 0), // Top
    (-1, 0, 0), // Back
    (-1, 0, 0), // Front
];

/// Same, along the merge height axis.
const H_DELTA: [(i32, i32, i32); 6] = [
    (0, -1, 0), // Left
    (0, -1, 0), // Right
    (0, 0, -1), // Bottom
    (0, 0, -1), // Top
    (0, -1, 0), // Back
    (0, -1, 0), // Front
];

#[inline]
fn row_end(dir: FaceDir, x: usize, z: usize, size: usize) -> bool {
    match dir {
        FaceDir::Left | FaceDir::Right => z >= size - 1,
        _ => x >= size - 1,
    }
}

#[inline]
fn in_bounds(size: i32, x: i32, y: i32, z: i32) -> bool {
    x >= 0 && x < size && y >= 0 && y < size && z >= 0 && z < size
}

/// Exposure of the cell across a face. Out-of-chunk cells count as
/// exposed; in-chunk cells defer to whichever visibility passes ran,
/// both passes combining conjunctively.
#[inline]
fn exposed(
    flood: Option<&VisitSet>,
    linear: Option<&VisitSet>,
    buf: &ChunkBuf,
    x: i32,
    y: i32,
    z: i32,
) -> bool {
    if !in_bounds(buf.size as i32, x, y, z) {
        return true;
    }
    let i = buf.idx(x as usize, y as usize, z as usize);
    match (flood, linear) {
        (Some(f), Some(l)) => f.get(i) && l.get(i),
        (Some(f), None) => f.get(i),
        (None, Some(l)) => l.get(i),
        (None, None) => true,
    }
}

/// Fills `cells` with the merged face state for every cell of `buf`.
pub fn build_render_cells(
    buf: &ChunkBuf,
    neighbors: &ChunkNeighbors<'_>,
    settings: &MeshSettings,
    flood: Option<&VisitSet>,
    linear: Option<&VisitSet>,
    cells: &mut Vec<RenderCell>,
) {
    let size = buf.size;
    let s = size as i32;
    cells.clear();
    cells.resize(buf.volume(), RenderCell::default());

    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let i = buf.idx(x, y, z);
                let voxel = buf.voxels[i];
                let renderable = voxel.is_renderable();
                let mut cell = RenderCell {
                    material: voxel.id,
                    ..RenderCell::default()
                };
                let (xi, yi, zi) = (x as i32, y as i32, z as i32);

                for dir in ALL_DIRS {
                    let d = dir.index();
                    let bit = dir.bit();
                    let (wdx, wdy, wdz) = W_DELTA[d];
                    let (hdx, hdy, hdz) = H_DELTA[d];

                    // Close off a strip pair left open by earlier rows.
                    // Runs for every cell so interior air can seal merges
                    // its renderable predecessors started.
                    if settings.do_greedy_meshing {
                        let (ax, ay, az) = (xi + wdx, yi + wdy, zi + wdz);
                        let (bx, by, bz) = (ax + hdx, ay + hdy, az + hdz);
                        if in_bounds(s, ax, ay, az) && in_bounds(s, bx, by, bz) {
                            let ia = buf.idx(ax as usize, ay as usize, az as usize);
                            let ib = buf.idx(bx as usize, by as usize, bz as usize);
                            let a = cells[ia];
                            let b = cells[ib];
                            if a.mask & bit != 0
                                && b.mask & bit != 0
                                && a.material == b.material
                                && a.w[d] == b.w[d]
                            {
                                cells[ia].h[d] = b.h[d] + 1;
                                cells[ib].mask &= !bit;
                            }
                        }
                    }

                    if !renderable {
                        continue;
                    }

                    let (fdx, fdy, fdz) = dir.delta();
                    let (fx, fy, fz) = (xi + fdx, yi + fdy, zi + fdz);
                    let across_clear = !neighbors.sample(buf, fx, fy, fz).is_renderable();
                    let face_wanted = !settings.do_faces_occlusion || across_clear;

                    if face_wanted && exposed(flood, linear, buf, fx, fy, fz) {
                        cell.mask |= bit;
                        if settings.do_greedy_meshing {
                            let (nx, ny, nz) = (xi + wdx, yi + wdy, zi + wdz);
                            if in_bounds(s, nx, ny, nz) {
                                let ni = buf.idx(nx as usize, ny as usize, nz as usize);
                                let n = cells[ni];
                                if n.mask & bit != 0
                                    && n.h[d] == 0
                                    && n.material == cell.material
                                {
                                    cell.w[d] = n.w[d] + 1;
                                    cells[ni].mask &= !bit;
                                }
                            }
                        }
                    }

                    // Strips ending on the chunk's far row never see a
                    // successor cell, so they merge downward here instead.
                    if settings.do_greedy_meshing && across_clear && row_end(dir, x, z, size) {
                        let (bx, by, bz) = (xi + hdx, yi + hdy, zi + hdz);
                        if in_bounds(s, bx, by, bz) {
                            let bi = buf.idx(bx as usize, by as usize, bz as usize);
                            let below = cells[bi];
                            if below.mask & bit != 0
                                && below.material == cell.material
                                && cell.w[d] == below.w[d]
                            {
                                cell.h[d] = below.h[d] + 1;
                                cells[bi].mask &= !bit;
                            }
                        }
                    }
                }

                cells[i] = cell;
            }
        }
    }
}

/// Walks the merged cells and produces one [`SquareFace`] per surviving
/// mask bit, optionally dropping faces turned away from the viewer.
pub fn collect_faces(
    buf: &ChunkBuf,
    settings: &MeshSettings,
    cells: &[RenderCell],
    out: &mut Vec<SquareFace>,
) {
    out.clear();
    let size = buf.size;
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let cell = cells[buf.idx(x, y, z)];
                if cell.mask == 0 {
                    continue;
                }
                for dir in ALL_DIRS {
                    let d = dir.index();
                    if cell.mask & dir.bit() == 0 {
                        continue;
                    }
                    let w = cell.w[d] as i32;
                    let h = cell.h[d] as i32;
                    let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                    // Re-anchor so the quad grows from its minimum corner
                    // along each merge axis.
                    let (ox, oy, oz) = match dir {
                        FaceDir::Left => (xi, yi - h, zi - w),
                        FaceDir::Right => (xi, yi - h, zi),
                        FaceDir::Bottom => (xi - w, yi, zi - h),
                        FaceDir::Top => (xi - w, yi, zi),
                        FaceDir::Back => (xi, yi - h, zi),
                        FaceDir::Front => (xi - w, yi - h, zi),
                    };
                    let face = SquareFace {
                        dir,
                        material: cell.material,
                        x: ox,
                        y: oy,
                        z: oz,
                        size_w: w + 1,
                        size_h: h + 1,
                    };
                    if settings.do_face_normal_check && !face.faces_viewer(settings.viewer_position)
                    {
                        continue;
                    }
                    out.push(face);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hollow_blocks::Voxel;
    use hollow_chunk::ChunkCoord;

    const ORIGIN: ChunkCoord = ChunkCoord { cx: 0, cy: 0, cz: 0 };

    fn settings(size: usize) -> MeshSettings {
        MeshSettings {
            chunk_size: size,
            do_flood_fill: false,
            do_linear_flood_fill: false,
            do_faces_occlusion: true,
            do_greedy_meshing: true,
            do_face_normal_check: false,
            ..MeshSettings::default()
        }
    }

    #[test]
    fn single_cell_has_six_unit_faces() {
        let mut buf = ChunkBuf::filled(ORIGIN, 4, Voxel::AIR);
        buf.set_local(1, 1, 1, Voxel::new(1));
        let s = settings(4);
        let mut cells = Vec::new();
        build_render_cells(&buf, &ChunkNeighbors::new(), &s, None, None, &mut cells);
        let mut faces = Vec::new();
        collect_faces(&buf, &s, &cells, &mut faces);
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.size_w == 1 && f.size_h == 1));
    }

    #[test]
    fn full_layer_merges_to_one_top_face() {
        // One solid y-layer spanning the chunk; its top should collapse
        // into a single size x size quad.
        let size = 4;
        let mut buf = ChunkBuf::filled(ORIGIN, size, Voxel::AIR);
        for z in 0..size {
            for x in 0..size {
                buf.set_local(x, 0, z, Voxel::new(1));
            }
        }
        let s = settings(size);
        let mut cells = Vec::new();
        build_render_cells(&buf, &ChunkNeighbors::new(), &s, None, None, &mut cells);
        let mut faces = Vec::new();
        collect_faces(&buf, &s, &cells, &mut faces);
        let tops: Vec<_> = faces.iter().filter(|f| f.dir == FaceDir::Top).collect();
        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].size_w, size as i32);
        assert_eq!(tops[0].size_h, size as i32);
        // Anchor keeps the native z of the last processed cell; the
        // corner table walks height toward -z from there.
        assert_eq!((tops[0].x, tops[0].y, tops[0].z), (0, 0, size as i32 - 1));
    }

    #[test]
    fn different_materials_do_not_merge() {
        let mut buf = ChunkBuf::filled(ORIGIN, 4, Voxel::AIR);
        buf.set_local(0, 0, 0, Voxel::new(1));
        buf.set_local(1, 0, 0, Voxel::new(2));
        let s = settings(4);
        let mut cells = Vec::new();
        build_render_cells(&buf, &ChunkNeighbors::new(), &s, None, None, &mut cells);
        let mut faces = Vec::new();
        collect_faces(&buf, &s, &cells, &mut faces);
        let tops: Vec<_> = faces.iter().filter(|f| f.dir == FaceDir::Top).collect();
        assert_eq!(tops.len(), 2);
        assert!(tops.iter().all(|f| f.size_w == 1));
    }

    #[test]
    fn greedy_off_emits_unit_faces_only() {
        let size = 3;
        let mut buf = ChunkBuf::filled(ORIGIN, size, Voxel::AIR);
        for z in 0..size {
            for x in 0..size {
                buf.set_local(x, 0, z, Voxel::new(1));
            }
        }
        let mut s = settings(size);
        s.do_greedy_meshing = false;
        let mut cells = Vec::new();
        build_render_cells(&buf, &ChunkNeighbors::new(), &s, None, None, &mut cells);
        let mut faces = Vec::new();
        collect_faces(&buf, &s, &cells, &mut faces);
        let tops = faces.iter().filter(|f| f.dir == FaceDir::Top).count();
        assert_eq!(tops, size * size);
        assert!(faces.iter().all(|f| f.size_w == 1 && f.size_h == 1));
    }

    #[test]
    fn occluded_interior_faces_are_skipped() {
        let buf = ChunkBuf::filled(ORIGIN, 4, Voxel::new(1));
        let solid = ChunkBuf::filled(ChunkCoord { cx: 1, cy: 0, cz: 0 }, 4, Voxel::new(1));
        let mut n = ChunkNeighbors::new();
        for dir in ALL_DIRS {
            n.set(dir, &solid);
        }
        let s = settings(4);
        let mut cells = Vec::new();
        build_render_cells(&buf, &n, &s, None, None, &mut cells);
        let mut faces = Vec::new();
        collect_faces(&buf, &s, &cells, &mut faces);
        assert!(faces.is_empty());
    }
}
