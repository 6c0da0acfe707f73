use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::MaterialId;

/// One catalog entry: a material key plus its cell in the texture atlas.
#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub cell: (u32, u32),
    pub transparent: bool,
}

/// Maps voxel ids to atlas cells. Ids are dense; lookups for ids the catalog
/// never defined fall back to cell `(0, 0)`.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    cells: Vec<(u32, u32)>,
    by_key: HashMap<String, MaterialId>,
    materials: Vec<Option<Material>>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize).and_then(|m| m.as_ref())
    }

    /// Atlas cell for a voxel id; unknown ids map to the fallback cell `(0, 0)`.
    #[inline]
    pub fn cell_of(&self, id: u8) -> (u32, u32) {
        self.cells.get(id as usize).copied().unwrap_or((0, 0))
    }

    pub fn is_transparent(&self, id: u8) -> bool {
        self.get(MaterialId(id)).is_some_and(|m| m.transparent)
    }

    pub fn len(&self) -> usize {
        self.materials.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        // TOML table iteration order is nondeterministic; sort keys so the
        // catalog is byte-stable for identical config inputs.
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let id = MaterialId(entry.id);
            let ix = entry.id as usize;
            if catalog.materials.len() <= ix {
                catalog.materials.resize(ix + 1, None);
                catalog.cells.resize(ix + 1, (0, 0));
            }
            if catalog.materials[ix].is_some() {
                return Err(format!("duplicate material id {} ({})", entry.id, key).into());
            }
            catalog.cells[ix] = (entry.cell[0], entry.cell[1]);
            catalog.by_key.insert(key.clone(), id);
            catalog.materials[ix] = Some(Material {
                id,
                key,
                cell: (entry.cell[0], entry.cell[1]),
                transparent: entry.transparent,
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// UV extent of one atlas cell, derived from the atlas texture dimensions.
/// The atlas itself (texture baking, image IO) lives outside this crate.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct AtlasLayout {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub cell_width_uv: f32,
    pub cell_height_uv: f32,
}

impl AtlasLayout {
    pub fn from_texture(pixel_width: u32, pixel_height: u32, cell_size_pixels: u32) -> Self {
        let atlas_width = pixel_width / cell_size_pixels;
        let atlas_height = pixel_height / cell_size_pixels;
        Self {
            atlas_width,
            atlas_height,
            cell_width_uv: 1.0 / atlas_width as f32,
            cell_height_uv: 1.0 / atlas_height as f32,
        }
    }
}

// --- Config ---

#[derive(Deserialize)]
struct MaterialsConfig {
    materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
struct MaterialEntry {
    id: u8,
    cell: [u32; 2],
    #[serde(default)]
    transparent: bool,
}
