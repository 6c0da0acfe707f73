use hollow_geom::Vec3;

use crate::face::FaceDir;
use crate::mesh_build::MeshBuild;

/// One merged rectangle of same-material faces, recorded in cell units.
/// `origin` is the anchor cell after the per-direction span adjustment,
/// so expansion only ever adds the span along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareFace {
    pub dir: FaceDir,
    pub material: u8,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub size_w: i32,
    pub size_h: i32,
}

impl SquareFace {
    /// Area in face units.
    pub fn area(&self) -> i64 {
        self.size_w as i64 * self.size_h as i64
    }

    /// Center of the anchor cell, used by the facing filter.
    pub fn anchor_center(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    /// Four corner positions in emit order. Winding faces outward for
    /// each direction under the (0,1,2)/(0,2,3) triangulation.
    pub fn corners(&self) -> [[f32; 3]; 4] {
        let (x, y, z) = (self.x as f32, self.y as f32, self.z as f32);
        let w = self.size_w as f32;
        let h = self.size_h as f32;
        match self.dir {
            FaceDir::Left => [
                [x, y, z],
                [x, y, z + w],
                [x, y + h, z + w],
                [x, y + h, z],
            ],
            FaceDir::Right => [
                [x + 1.0, y, z + 1.0],
                [x + 1.0, y, z + 1.0 - w],
                [x + 1.0, y + h, z + 1.0 - w],
                [x + 1.0, y + h, z + 1.0],
            ],
            FaceDir::Bottom => [
                [x, y, z],
                [x + w, y, z],
                [x + w, y, z + h],
                [x, y, z + h],
            ],
            FaceDir::Top => [
                [x, y + 1.0, z + 1.0],
                [x + w, y + 1.0, z + 1.0],
                [x + w, y + 1.0, z + 1.0 - h],
                [x, y + 1.0, z + 1.0 - h],
            ],
            FaceDir::Back => [
                [x + 1.0, y, z],
                [x + 1.0 - w, y, z],
                [x + 1.0 - w, y + h, z],
                [x + 1.0, y + h, z],
            ],
            FaceDir::Front => [
                [x, y, z + 1.0],
                [x + w, y, z + 1.0],
                [x + w, y + h, z + 1.0],
                [x, y + h, z + 1.0],
            ],
        }
    }

    /// Appends this face's quad with UVs for the given atlas cell.
    pub fn emit(&self, cell: (u32, u32), cell_w: f32, cell_h: f32, out: &mut MeshBuild) {
        let u_min = cell.0 as f32 * cell_w;
        let v_min = cell.1 as f32 * cell_h;
        let u_max = u_min + cell_w;
        let v_max = v_min + cell_h;
        out.push_quad(
            self.corners(),
            [
                [u_min, v_min],
                [u_max, v_min],
                [u_max, v_max],
                [u_min, v_max],
            ],
        );
    }

    /// True when the outward normal points toward `viewer`.
    pub fn faces_viewer(&self, viewer: Vec3) -> bool {
        let to_viewer = (viewer - self.anchor_center()).normalized();
        self.dir.normal().dot(to_viewer) > 0.0
    }
}
