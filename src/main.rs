//! Headless demo: generate a noise terrain world, mesh every chunk
//! through the worker runtime, and report what came out.

mod worldgen;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use hollow_blocks::{AtlasLayout, MaterialCatalog};
use hollow_chunk::ChunkCoord;
use hollow_geom::Vec3;
use hollow_mesh_cpu::{ChunkMesh, MeshSettings, MeshUpload};
use hollow_runtime::Runtime;

use crate::worldgen::{WorldGen, WorldGenConfig};

const DEFAULT_MATERIALS: &str = include_str!("../assets/materials.toml");

#[derive(Parser, Debug)]
#[command(name = "hollow", about = "Voxel chunk meshing pipeline demo")]
struct Args {
    /// World extent in chunks along X.
    #[arg(long, default_value_t = 4)]
    chunks_x: i32,
    /// World extent in chunks along Y.
    #[arg(long, default_value_t = 4)]
    chunks_y: i32,
    /// World extent in chunks along Z.
    #[arg(long, default_value_t = 4)]
    chunks_z: i32,
    /// Voxels per chunk edge.
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,
    /// Terrain seed.
    #[arg(long, default_value_t = 1337)]
    seed: i32,
    /// Materials config; falls back to the built-in set.
    #[arg(long)]
    materials: Option<PathBuf>,
    /// Terrain config TOML; falls back to built-in defaults.
    #[arg(long)]
    worldgen: Option<PathBuf>,
    /// Disable greedy merging (one quad per visible face).
    #[arg(long)]
    no_greedy: bool,
    /// Disable both visibility fills (mesh sealed cavities too).
    #[arg(long)]
    no_fills: bool,
    /// Enable the camera-facing quad filter from this viewpoint,
    /// given as "x,y,z" in world voxels.
    #[arg(long)]
    viewer: Option<String>,
    /// Upper bound on concurrently meshing chunks.
    #[arg(long, default_value_t = 8)]
    max_builds: usize,
}

/// Upload sink that only tallies geometry. A renderer would push the
/// buffers to the GPU here and keep the returned handle.
#[derive(Default)]
struct CountingUpload {
    meshes: usize,
    quads: usize,
    vertices: usize,
}

impl MeshUpload for CountingUpload {
    type Handle = usize;

    fn upload(&mut self, _coord: ChunkCoord, mesh: &ChunkMesh) -> usize {
        self.meshes += 1;
        self.quads += mesh.quad_count();
        self.vertices += mesh.positions.len() / 3;
        self.meshes
    }
}

fn parse_viewer(s: &str) -> Result<Vec3, Box<dyn Error>> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()?;
    if parts.len() != 3 {
        return Err(format!("expected x,y,z viewer position, got {s:?}").into());
    }
    Ok(Vec3::new(parts[0], parts[1], parts[2]))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let catalog = match &args.materials {
        Some(path) => MaterialCatalog::from_path(path)?,
        None => MaterialCatalog::from_toml_str(DEFAULT_MATERIALS)?,
    };
    let catalog = Arc::new(catalog);
    let atlas = AtlasLayout::from_texture(64, 64, 16);

    let mut settings = MeshSettings {
        chunk_size: args.chunk_size,
        max_concurrent_builds: args.max_builds,
        ..MeshSettings::default()
    };
    if args.no_greedy {
        settings.do_greedy_meshing = false;
    }
    if args.no_fills {
        settings.do_flood_fill = false;
        settings.do_linear_flood_fill = false;
    }
    if let Some(v) = &args.viewer {
        settings.do_face_normal_check = true;
        settings.viewer_position = parse_viewer(v)?;
    }

    let mut gen_cfg = match &args.worldgen {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => WorldGenConfig::default(),
    };
    gen_cfg.seed = args.seed;
    let r#gen = WorldGen::new(gen_cfg);
    let world_height = args.chunks_y as usize * args.chunk_size;

    let mut rt = Runtime::new(settings, catalog, atlas);
    log::info!(
        "meshing {}x{}x{} chunks of {} voxels on {} workers",
        args.chunks_x,
        args.chunks_y,
        args.chunks_z,
        args.chunk_size,
        rt.workers
    );

    let t_gen = Instant::now();
    let mut coords = Vec::new();
    for cz in 0..args.chunks_z {
        for cy in 0..args.chunks_y {
            for cx in 0..args.chunks_x {
                let coord = ChunkCoord { cx, cy, cz };
                rt.insert_chunk(r#gen.generate_chunk(coord, args.chunk_size, world_height));
                coords.push(coord);
            }
        }
    }
    log::info!("generated {} chunks in {:?}", coords.len(), t_gen.elapsed());

    // All data is registered before any build dispatches, so every chunk
    // meshes with its full neighborhood present.
    for coord in &coords {
        rt.submit(*coord);
    }

    let t_mesh = Instant::now();
    let outputs = rt.drain();
    let wall_ms = t_mesh.elapsed().as_millis();

    let mut sink = CountingUpload::default();
    let mut empty = 0usize;
    for out in &outputs {
        match &out.result {
            Ok(mesh) => {
                log::info!(
                    target: "perf",
                    "mesh_ms={} total_ms={} quads={} cx={} cy={} cz={} rev={}",
                    out.t_mesh_ms,
                    out.t_total_ms,
                    mesh.quad_count(),
                    out.coord.cx,
                    out.coord.cy,
                    out.coord.cz,
                    out.rev
                );
                if mesh.is_empty() {
                    empty += 1;
                } else {
                    sink.upload(out.coord, mesh);
                }
            }
            Err(e) => {
                log::error!(
                    "build failed for ({}, {}, {}): {e}",
                    out.coord.cx,
                    out.coord.cy,
                    out.coord.cz
                );
            }
        }
    }

    let (idle, allocated) = rt.scratch_stats();
    log::info!(
        "meshed {} chunks in {wall_ms}ms: {} meshes, {} quads, {} vertices, {empty} empty, scratch {idle}/{allocated}",
        outputs.len(),
        sink.meshes,
        sink.quads,
        sink.vertices
    );
    Ok(())
}
