//! Static parallel-for over a body index range
//!
//! The range `[0, N)` is cut into `num_threads` contiguous chunks of
//! `ceil(N / num_threads)` indices. Each non-empty chunk is one task on a
//! persistent rayon pool, and every call blocks until all chunks finish.
//! Chunks write disjoint parts of the output, so results do not depend on
//! scheduling order.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SimError};
use crate::simulation::states::NVec2;

pub struct ParallelDispatcher {
    pool: ThreadPool,
    num_threads: usize,
}

impl ParallelDispatcher {
    /// Pool with exactly `num_threads` workers
    pub fn new(num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(SimError::InvalidParameter("thread count must be at least 1".into()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("quadsim-worker-{i}"))
            .build()?;
        Ok(Self { pool, num_threads })
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// `ceil(n / num_threads)`, never zero
    pub fn chunk_size(&self, n: usize) -> usize {
        ((n + self.num_threads - 1) / self.num_threads).max(1)
    }

    /// Fill `out[i] = eval(i)` for every index, one chunk per worker
    pub fn evaluate<F>(&self, out: &mut [NVec2], eval: F)
    where
        F: Fn(usize) -> NVec2 + Sync,
    {
        self.for_each_indexed(out, |i, a| *a = eval(i));
    }

    /// Run `f(i, &mut items[i])` for every index, one chunk per worker
    pub fn for_each_indexed<T, F>(&self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync,
    {
        let n = items.len();
        if n == 0 {
            return;
        }
        let stride = self.chunk_size(n);

        self.pool.install(|| {
            items
                .par_chunks_mut(stride)
                .enumerate()
                .for_each(|(chunk_idx, chunk)| {
                    let start = chunk_idx * stride;
                    for (local, item) in chunk.iter_mut().enumerate() {
                        f(start + local, item);
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_rounds_up() {
        let d = ParallelDispatcher::new(4).unwrap();
        assert_eq!(d.chunk_size(10), 3);
        assert_eq!(d.chunk_size(8), 2);
        assert_eq!(d.chunk_size(1), 1);
    }

    #[test]
    fn zero_threads_rejected() {
        assert!(ParallelDispatcher::new(0).is_err());
    }

    #[test]
    fn every_index_visited_once() {
        let d = ParallelDispatcher::new(3).unwrap();
        let mut out = vec![NVec2::zeros(); 11];
        d.evaluate(&mut out, |i| NVec2::new(i as f64, 1.0));
        for (i, a) in out.iter().enumerate() {
            assert_eq!(*a, NVec2::new(i as f64, 1.0));
        }
    }
}
