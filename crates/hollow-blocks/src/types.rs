/// Material id of the empty cell. A voxel with this id never contributes geometry.
pub const AIR_ID: u8 = 0;

/// Per-voxel flag bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VoxelFlags {
    /// Renderable as non-solid (e.g. glass): generates no faces and does not
    /// occlude its neighbors; counts as empty for the visibility passes.
    Transparent = 1 << 0,
}

/// One cell of a chunk grid: a material id plus a flag bitset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Voxel {
    pub id: u8,
    pub flags: u8,
}

impl Voxel {
    pub const AIR: Voxel = Voxel { id: AIR_ID, flags: 0 };

    #[inline]
    pub const fn new(id: u8) -> Self {
        Self { id, flags: 0 }
    }

    #[inline]
    pub const fn transparent(id: u8) -> Self {
        Self {
            id,
            flags: VoxelFlags::Transparent as u8,
        }
    }

    #[inline]
    pub fn has_flag(self, flag: VoxelFlags) -> bool {
        self.flags & flag as u8 != 0
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == AIR_ID
    }

    /// Whether this voxel occludes its neighbors and produces faces itself.
    /// Air and transparent voxels do neither.
    #[inline]
    pub fn is_renderable(self) -> bool {
        !self.is_air() && !self.has_flag(VoxelFlags::Transparent)
    }
}

/// Index into the material catalog; voxel ids map onto this one-to-one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_not_renderable() {
        assert!(Voxel::AIR.is_air());
        assert!(!Voxel::AIR.is_renderable());
    }

    #[test]
    fn transparent_counts_as_empty_for_occlusion() {
        let glass = Voxel::transparent(7);
        assert!(!glass.is_air());
        assert!(glass.has_flag(VoxelFlags::Transparent));
        assert!(!glass.is_renderable());
    }

    #[test]
    fn opaque_material_is_renderable() {
        assert!(Voxel::new(3).is_renderable());
    }
}
