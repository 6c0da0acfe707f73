use hollow_geom::Vec3;

/// The six axis-aligned face directions of a voxel cell. Discriminants are
/// the bit positions used in [`crate::RenderCell`] masks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceDir {
    Left = 0,   // -X
    Right = 1,  // +X
    Bottom = 2, // -Y
    Top = 3,    // +Y
    Back = 4,   // -Z
    Front = 5,  // +Z
}

pub const ALL_DIRS: [FaceDir; 6] = [
    FaceDir::Left,
    FaceDir::Right,
    FaceDir::Bottom,
    FaceDir::Top,
    FaceDir::Back,
    FaceDir::Front,
];

impl FaceDir {
    /// Returns the `[0..6)` index of this direction.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Render-mask bit for this direction.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            FaceDir::Left => (-1, 0, 0),
            FaceDir::Right => (1, 0, 0),
            FaceDir::Bottom => (0, -1, 0),
            FaceDir::Top => (0, 1, 0),
            FaceDir::Back => (0, 0, -1),
            FaceDir::Front => (0, 0, 1),
        }
    }

    /// Returns the outward unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_cover_low_six() {
        let mut mask = 0u8;
        for d in ALL_DIRS {
            mask |= d.bit();
        }
        assert_eq!(mask, 0b0011_1111);
    }

    #[test]
    fn indices_match_list_order() {
        for (i, d) in ALL_DIRS.into_iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn opposite_deltas_cancel() {
        for (a, b) in [
            (FaceDir::Left, FaceDir::Right),
            (FaceDir::Bottom, FaceDir::Top),
            (FaceDir::Back, FaceDir::Front),
        ] {
            let (ax, ay, az) = a.delta();
            let (bx, by, bz) = b.delta();
            assert_eq!((ax + bx, ay + by, az + bz), (0, 0, 0));
        }
    }
}
