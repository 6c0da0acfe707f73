use hollow_blocks::{AtlasLayout, MaterialCatalog, MaterialId};
use proptest::prelude::*;

const DEMO: &str = r#"
[materials.air]
id = 0
cell = [0, 0]

[materials.grass]
id = 1
cell = [1, 0]

[materials.dirt]
id = 2
cell = [2, 0]

[materials.stone]
id = 3
cell = [3, 0]

[materials.glass]
id = 4
cell = [0, 1]
transparent = true
"#;

#[test]
fn catalog_maps_ids_to_cells() {
    let cat = MaterialCatalog::from_toml_str(DEMO).unwrap();
    assert_eq!(cat.cell_of(1), (1, 0));
    assert_eq!(cat.cell_of(3), (3, 0));
    assert_eq!(cat.cell_of(4), (0, 1));
}

#[test]
fn unknown_id_falls_back_to_origin_cell() {
    let cat = MaterialCatalog::from_toml_str(DEMO).unwrap();
    assert_eq!(cat.cell_of(200), (0, 0));
}

#[test]
fn keys_resolve_to_ids() {
    let cat = MaterialCatalog::from_toml_str(DEMO).unwrap();
    assert_eq!(cat.get_id("stone"), Some(MaterialId(3)));
    assert_eq!(cat.get_id("bedrock"), None);
    assert!(cat.is_transparent(4));
    assert!(!cat.is_transparent(2));
}

#[test]
fn duplicate_ids_are_rejected() {
    let bad = r#"
[materials.a]
id = 1
cell = [0, 0]

[materials.b]
id = 1
cell = [1, 0]
"#;
    assert!(MaterialCatalog::from_toml_str(bad).is_err());
}

#[test]
fn atlas_layout_from_texture_dimensions() {
    // 128x64 atlas of 32px cells: 4x2 grid
    let atlas = AtlasLayout::from_texture(128, 64, 32);
    assert_eq!(atlas.atlas_width, 4);
    assert_eq!(atlas.atlas_height, 2);
    assert_eq!(atlas.cell_width_uv, 0.25);
    assert_eq!(atlas.cell_height_uv, 0.5);
}

proptest! {
    // TOML table order is writer's choice; lookups must not depend on it.
    #[test]
    fn declaration_order_does_not_change_lookups(
        entries in Just(vec![
            ("air", 0u8, (0u32, 0u32)),
            ("grass", 1, (1, 0)),
            ("dirt", 2, (2, 0)),
            ("stone", 3, (3, 0)),
            ("glass", 4, (0, 1)),
        ])
        .prop_shuffle()
    ) {
        let mut doc = String::new();
        for (key, id, cell) in &entries {
            doc.push_str(&format!(
                "[materials.{key}]\nid = {id}\ncell = [{}, {}]\n\n",
                cell.0, cell.1
            ));
        }
        let cat = MaterialCatalog::from_toml_str(&doc).unwrap();
        for (key, id, cell) in &entries {
            prop_assert_eq!(cat.get_id(key), Some(MaterialId(*id)));
            prop_assert_eq!(cat.cell_of(*id), *cell);
        }
    }
}
