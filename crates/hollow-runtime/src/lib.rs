//! Runtime job queue and worker orchestration for chunk mesh builds.
#![forbid(unsafe_code)]

mod scratch_pool;

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use hollow_blocks::{AtlasLayout, MaterialCatalog};
use hollow_chunk::{ChunkBuf, ChunkCoord, ChunkOccupancy};
use hollow_mesh_cpu::{
    ALL_DIRS, ChunkMesh, ChunkNeighbors, MeshBuild, MeshError, MeshSettings,
    build_chunk_mesh_with_scratch,
};
use rayon::{ThreadPool, ThreadPoolBuilder};

pub use scratch_pool::{PooledScratch, ScratchPool};

/// One unit of work for the mesh workers. The voxel data travels as
/// `Arc` snapshots taken at dispatch, so a later edit to the registry
/// never races a build in flight.
#[derive(Clone)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub buf: Arc<ChunkBuf>,
    pub neighbors: [Option<Arc<ChunkBuf>>; 6],
}

pub struct BuildOutput {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub occupancy: ChunkOccupancy,
    pub result: Result<ChunkMesh, BuildError>,
    pub t_total_ms: u32,
    pub t_mesh_ms: u32,
}

#[derive(Debug)]
pub enum BuildError {
    Mesh(MeshError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Mesh(e) => write!(f, "mesh build failed: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::Mesh(e) => Some(e),
        }
    }
}

impl From<MeshError> for BuildError {
    fn from(e: MeshError) -> Self {
        BuildError::Mesh(e)
    }
}

fn ms_u32(since: Instant) -> u32 {
    since.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

fn process_build_job(
    job: BuildJob,
    settings: &MeshSettings,
    catalog: &MaterialCatalog,
    atlas: &AtlasLayout,
    scratch_pool: &ScratchPool,
    tx: &Sender<BuildOutput>,
) {
    let t_job_start = Instant::now();
    let occupancy = job.buf.occupancy();

    // Empty chunks skip the pipeline entirely and report empty geometry.
    if occupancy.is_empty() {
        let _ = tx.send(BuildOutput {
            coord: job.coord,
            rev: job.rev,
            job_id: job.job_id,
            occupancy,
            result: Ok(ChunkMesh::from_build(job.coord, &MeshBuild::new())),
            t_total_ms: ms_u32(t_job_start),
            t_mesh_ms: 0,
        });
        return;
    }

    let mut neighbors = ChunkNeighbors::new();
    for dir in ALL_DIRS {
        if let Some(buf) = job.neighbors[dir.index()].as_deref() {
            neighbors.set(dir, buf);
        }
    }

    let t0 = Instant::now();
    let mut scratch = scratch_pool.acquire(job.buf.volume());
    let result = build_chunk_mesh_with_scratch(
        &job.buf,
        &neighbors,
        settings,
        catalog,
        atlas,
        &mut scratch,
    )
    .map_err(BuildError::from);
    let t_mesh_ms = ms_u32(t0);

    let _ = tx.send(BuildOutput {
        coord: job.coord,
        rev: job.rev,
        job_id: job.job_id,
        occupancy,
        result,
        t_total_ms: ms_u32(t_job_start),
        t_mesh_ms,
    });
}

struct ChunkEntry {
    buf: Arc<ChunkBuf>,
    rev: u64,
}

/// Owns the worker pool and the chunk registry. All registry mutation
/// and scheduling happens on the thread that owns the `Runtime`; the
/// workers only ever see `Arc` snapshots.
pub struct Runtime {
    job_tx: Sender<BuildJob>,
    res_rx: Receiver<BuildOutput>,
    _pool: Arc<ThreadPool>,
    pub workers: usize,
    settings: MeshSettings,
    chunks: HashMap<ChunkCoord, ChunkEntry>,
    pending: VecDeque<ChunkCoord>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    dispatched: usize,
    next_job_id: u64,
    scratch_pool: Arc<ScratchPool>,
}

impl Runtime {
    pub fn new(
        settings: MeshSettings,
        catalog: Arc<MaterialCatalog>,
        atlas: AtlasLayout,
    ) -> Self {
        let (job_tx, job_rx) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<BuildOutput>();

        let workers: usize = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(8)
            .min(settings.max_concurrent_builds.max(1));
        let scratch_pool = ScratchPool::with_capacity_from_workers(workers);

        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("hollow-mesh-{i}"))
                .build()
                .expect("mesh pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let settings = settings.clone();
            let catalog = catalog.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            let scratch_pool = scratch_pool.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_build_job(job, &settings, &catalog, &atlas, &scratch_pool, &tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }

        Self {
            job_tx,
            res_rx,
            _pool: pool,
            workers,
            settings,
            chunks: HashMap::new(),
            pending: VecDeque::new(),
            queued,
            inflight,
            dispatched: 0,
            next_job_id: 0,
            scratch_pool,
        }
    }

    /// Registers or replaces a chunk's voxel data, bumping its revision.
    /// Returns the new revision.
    pub fn insert_chunk(&mut self, buf: ChunkBuf) -> u64 {
        let coord = buf.coord;
        let entry = self.chunks.entry(coord).or_insert(ChunkEntry {
            buf: Arc::new(ChunkBuf::empty(coord, self.settings.chunk_size)),
            rev: 0,
        });
        entry.rev += 1;
        entry.buf = Arc::new(buf);
        entry.rev
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Arc<ChunkBuf>> {
        self.chunks.get(&coord).map(|e| &e.buf)
    }

    /// Queues a rebuild for `coord`. Unknown coordinates are ignored;
    /// dispatch happens during [`pump`](Self::pump) and polling.
    pub fn submit(&mut self, coord: ChunkCoord) {
        if self.chunks.contains_key(&coord) {
            self.pending.push_back(coord);
        }
    }

    /// Dispatches pending builds while under the in-flight cap. Neighbor
    /// snapshots are taken here, not at request time, so a build always
    /// sees the newest data available at dispatch.
    pub fn pump(&mut self) {
        let cap = self.settings.max_concurrent_builds.max(1);
        while self.dispatched < cap {
            let Some(coord) = self.pending.pop_front() else {
                break;
            };
            let Some(entry) = self.chunks.get(&coord) else {
                continue;
            };
            let mut neighbors: [Option<Arc<ChunkBuf>>; 6] = Default::default();
            for dir in ALL_DIRS {
                let (dx, dy, dz) = dir.delta();
                if let Some(n) = self.chunks.get(&coord.offset(dx, dy, dz)) {
                    neighbors[dir.index()] = Some(n.buf.clone());
                }
            }
            let job = BuildJob {
                coord,
                rev: entry.rev,
                job_id: self.next_job_id,
                buf: entry.buf.clone(),
                neighbors,
            };
            self.next_job_id += 1;
            self.queued.fetch_add(1, Ordering::Relaxed);
            self.dispatched += 1;
            log::debug!(
                "dispatch mesh job {} for ({}, {}, {}) rev {}",
                job.job_id,
                coord.cx,
                coord.cy,
                coord.cz,
                job.rev
            );
            if self.job_tx.send(job).is_err() {
                self.queued.fetch_sub(1, Ordering::Relaxed);
                self.dispatched -= 1;
                break;
            }
        }
    }

    /// Drains finished builds without blocking, drops results whose
    /// revision is stale, and dispatches more pending work.
    pub fn poll_completed(&mut self) -> Vec<BuildOutput> {
        let mut fresh = Vec::new();
        for out in self.res_rx.try_iter() {
            self.dispatched = self.dispatched.saturating_sub(1);
            let current = self.chunks.get(&out.coord).map(|e| e.rev);
            if current != Some(out.rev) {
                log::debug!(
                    "drop stale result for ({}, {}, {}) rev {}",
                    out.coord.cx,
                    out.coord.cy,
                    out.coord.cz,
                    out.rev
                );
                continue;
            }
            fresh.push(out);
        }
        self.pump();
        fresh
    }

    /// Runs the queue to completion, blocking until every pending and
    /// in-flight build has reported.
    pub fn drain(&mut self) -> Vec<BuildOutput> {
        self.pump();
        let mut all = Vec::new();
        while self.dispatched > 0 {
            match self.res_rx.recv() {
                Ok(out) => {
                    self.dispatched -= 1;
                    let current = self.chunks.get(&out.coord).map(|e| e.rev);
                    if current == Some(out.rev) {
                        all.push(out);
                    }
                    self.pump();
                }
                Err(_) => break,
            }
        }
        all
    }

    /// (queued, in-flight, pending) counts, for debug overlays and logs.
    pub fn queue_debug_counts(&self) -> (usize, usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
            self.pending.len(),
        )
    }

    /// (idle, ever-allocated) scratch buffer counts.
    pub fn scratch_stats(&self) -> (usize, usize) {
        self.scratch_pool.stats()
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }
}
