use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use hollow_mesh_cpu::BuildScratch;

/// Lock-free pool for reusing per-build scratch buffers across worker jobs.
pub struct ScratchPool {
    available_tx: Sender<BuildScratch>,
    available_rx: Receiver<BuildScratch>,
    allocated: AtomicUsize,
    max_scratches: usize,
}

impl ScratchPool {
    pub fn new(max_scratches: usize) -> Self {
        debug_assert!(max_scratches > 0);
        let (tx, rx) = bounded(max_scratches);
        Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_scratches,
        }
    }

    pub fn with_capacity_from_workers(worker_count: usize) -> Arc<Self> {
        Arc::new(Self::new(worker_count.max(1) * 2))
    }

    /// Acquire scratch buffers, allocating fresh ones while under capacity
    /// and blocking on a release once the cap is reached.
    pub fn acquire<'pool>(&'pool self, volume: usize) -> PooledScratch<'pool> {
        if let Ok(mut scratch) = self.available_rx.try_recv() {
            scratch.reset();
            return PooledScratch {
                scratch: Some(scratch),
                pool: self,
            };
        }

        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_scratches {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_scratches {
                    return PooledScratch {
                        scratch: Some(BuildScratch::with_capacity(volume)),
                        pool: self,
                    };
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }

            match self.available_rx.recv() {
                Ok(mut scratch) => {
                    scratch.reset();
                    return PooledScratch {
                        scratch: Some(scratch),
                        pool: self,
                    };
                }
                Err(_) => continue,
            }
        }
    }

    /// (idle, ever-allocated) counts, for stats reporting.
    pub fn stats(&self) -> (usize, usize) {
        (
            self.available_rx.len(),
            self.allocated.load(Ordering::Relaxed),
        )
    }

    fn release(&self, scratch: BuildScratch) {
        let _ = self.available_tx.send(scratch);
    }
}

pub struct PooledScratch<'pool> {
    scratch: Option<BuildScratch>,
    pool: &'pool ScratchPool,
}

impl<'pool> Deref for PooledScratch<'pool> {
    type Target = BuildScratch;

    fn deref(&self) -> &Self::Target {
        self.scratch.as_ref().expect("scratch already released")
    }
}

impl<'pool> DerefMut for PooledScratch<'pool> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.scratch.as_mut().expect("scratch already released")
    }
}

impl<'pool> Drop for PooledScratch<'pool> {
    fn drop(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            self.pool.release(scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_scratch() {
        let pool = ScratchPool::new(2);
        {
            let _a = pool.acquire(64);
            let _b = pool.acquire(64);
            assert_eq!(pool.stats(), (0, 2));
        }
        assert_eq!(pool.stats(), (2, 2));
        let _c = pool.acquire(64);
        assert_eq!(pool.stats(), (1, 2));
    }
}
