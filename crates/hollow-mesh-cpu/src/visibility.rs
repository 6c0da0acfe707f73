//! Void-reachability passes. Both passes mark air-side cells that can be
//! reached from outside the chunk; faces adjoining unmarked pockets are
//! skipped during rendering.

use hollow_chunk::ChunkBuf;

use crate::visit::VisitSet;

/// Breadth-first fill from the chunk boundary. Every boundary cell is
/// marked visited up front; only non-renderable boundary cells seed the
/// frontier, and the fill spreads through non-renderable interior cells.
pub fn flood_fill(buf: &ChunkBuf, visited: &mut VisitSet, frontier: &mut Vec<u32>) {
    let size = buf.size;
    visited.reset(buf.volume());
    frontier.clear();

    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if x != 0 && x != size - 1 && y != 0 && y != size - 1 && z != 0 && z != size - 1 {
                    continue;
                }
                let i = buf.idx(x, y, z);
                visited.set(i);
                if !buf.voxels[i].is_renderable() {
                    frontier.push(i as u32);
                }
            }
        }
    }

    let deltas: [(i32, i32, i32); 6] = [
        (-1, 0, 0),
        (1, 0, 0),
        (0, -1, 0),
        (0, 1, 0),
        (0, 0, -1),
        (0, 0, 1),
    ];
    let s = size as i32;
    let mut cursor = 0usize;
    while cursor < frontier.len() {
        let i = frontier[cursor] as usize;
        cursor += 1;
        let x = (i % size) as i32;
        let y = ((i / size) % size) as i32;
        let z = (i / (size * size)) as i32;
        for (dx, dy, dz) in deltas {
            let (nx, ny, nz) = (x + dx, y + dy, z + dz);
            if nx < 0 || nx >= s || ny < 0 || ny >= s || nz < 0 || nz >= s {
                continue;
            }
            let ni = buf.idx(nx as usize, ny as usize, nz as usize);
            if visited.get(ni) {
                continue;
            }
            if buf.voxels[ni].is_renderable() {
                continue;
            }
            visited.set(ni);
            frontier.push(ni as u32);
        }
    }
}

/// Axis-aligned ray fill. For each of the six directions a ray is cast
/// from every cell of the opposite face; the ray marks cells visited,
/// including the first renderable cell it hits, then stops there or at
/// a cell an earlier ray already claimed.
pub fn linear_flood_fill(buf: &ChunkBuf, visited: &mut VisitSet) {
    let size = buf.size as i32;
    visited.reset(buf.volume());

    let deltas: [(i32, i32, i32); 6] = [
        (-1, 0, 0),
        (1, 0, 0),
        (0, -1, 0),
        (0, 1, 0),
        (0, 0, -1),
        (0, 0, 1),
    ];
    for (dx, dy, dz) in deltas {
        // Rays travel along (dx,dy,dz), entering through the face they
        // point away from.
        let start_x = if dx > 0 { 0 } else { size - 1 };
        let start_y = if dy > 0 { 0 } else { size - 1 };
        let start_z = if dz > 0 { 0 } else { size - 1 };
        for a in 0..size {
            for b in 0..size {
                let (mut x, mut y, mut z) = if dx != 0 {
                    (start_x, a, b)
                } else if dy != 0 {
                    (a, start_y, b)
                } else {
                    (a, b, start_z)
                };
                while x >= 0 && x < size && y >= 0 && y < size && z >= 0 && z < size {
                    let i = buf.idx(x as usize, y as usize, z as usize);
                    if visited.get(i) {
                        break;
                    }
                    visited.set(i);
                    if buf.voxels[i].is_renderable() {
                        break;
                    }
                    x += dx;
                    y += dy;
                    z += dz;
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

    fn shelled(size: usize) -> ChunkBuf {
        // Solid shell, air pocket inside.
        let mut buf = ChunkBuf::filled(ORIGIN, size, Voxel::new(1));
        for z in 1..size - 1 {
            for y in 1..size - 1 {
                for x in 1..size - 1 {
                    buf.set_local(x, y, z, Voxel::AIR);
                }
            }
        }
        buf
    }

    #[test]
    fn sealed_pocket_stays_unvisited() {
        let buf = shelled(5);
        let mut visited = VisitSet::default();
        let mut frontier = Vec::new();
        flood_fill(&buf, &mut visited, &mut frontier);
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    assert!(!visited.get(buf.idx(x, y, z)), "pocket cell ({x},{y},{z})");
                }
            }
        }
    }

    #[test]
    fn boundary_is_always_visited() {
        let buf = ChunkBuf::filled(ORIGIN, 4, Voxel::new(1));
        let mut visited = VisitSet::default();
        let mut frontier = Vec::new();
        flood_fill(&buf, &mut visited, &mut frontier);
        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    let on_edge = x == 0 || x == 3 || y == 0 || y == 3 || z == 0 || z == 3;
                    assert_eq!(visited.get(buf.idx(x, y, z)), on_edge);
                }
            }
        }
    }

    #[test]
    fn linear_fill_marks_the_blocking_cell() {
        // A solid plane at y=2 splits every column; the plane cells are
        // where the rays stop, and the stop cell itself is marked.
        let mut buf = ChunkBuf::filled(ORIGIN, 4, Voxel::AIR);
        for z in 0..4 {
            for x in 0..4 {
                buf.set_local(x, 2, z, Voxel::new(1));
            }
        }
        let mut visited = VisitSet::default();
        linear_flood_fill(&buf, &mut visited);
        for z in 0..4 {
            for x in 0..4 {
                assert!(visited.get(buf.idx(x, 2, z)));
                assert!(visited.get(buf.idx(x, 0, z)));
                assert!(visited.get(buf.idx(x, 3, z)));
            }
        }
    }

    #[test]
    fn linear_fill_never_passes_a_solid_cell() {
        // A 3x3x3 solid cube in a 5x5x5 air chunk: every ray stops on the
        // cube's surface, so the core cell is shadowed on all six axes.
        let mut buf = ChunkBuf::filled(ORIGIN, 5, Voxel::AIR);
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    buf.set_local(x, y, z, Voxel::new(1));
                }
            }
        }
        let mut visited = VisitSet::default();
        linear_flood_fill(&buf, &mut visited);
        assert!(visited.get(buf.idx(1, 2, 2)));
        assert!(visited.get(buf.idx(3, 2, 2)));
        assert!(!visited.get(buf.idx(2, 2, 2)));
    }

    #[test]
    fn linear_fill_misses_lateral_pocket() {
        // An L-shaped cavity: the bend is reachable by BFS but not by any
        // straight ray, so the two passes legitimately disagree.
        let mut buf = ChunkBuf::filled(ORIGIN, 5, Voxel::new(1));
        // Tunnel in from the left face at (.,2,2), then a side pocket.
        buf.set_local(0, 2, 2, Voxel::AIR);
        buf.set_local(1, 2, 2, Voxel::AIR);
        buf.set_local(1, 2, 3, Voxel::AIR);
        let mut linear = VisitSet::default();
        linear_flood_fill(&buf, &mut linear);
        let mut general = VisitSet::default();
        let mut frontier = Vec::new();
        flood_fill(&buf, &mut general, &mut frontier);
        let pocket = buf.idx(1, 2, 3);
        assert!(general.get(pocket));
        assert!(!linear.get(pocket));
    }
}
