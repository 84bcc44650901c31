use crate::error::{GitstatsError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic;
use std::sync::mpsc;
use std::thread;

/// Owns all mutable aggregation state. Fed one item at a time from a
/// single thread, so implementations need no locking.
pub trait Reducer<T>: Send {
    type Output: Send;

    fn absorb(&mut self, item: T);

    fn finish(self) -> Self::Output;
}

/// Fixed-size worker pool that maps items in parallel and funnels the
/// results into one reducer thread.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GitstatsError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gitstats-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Map every item on the pool and fold the results with `reducer`.
    ///
    /// Returns after all items are mapped, the channel is drained and the
    /// reducer thread has joined.
    pub fn run<I, T, F, R>(&self, items: Vec<I>, map: F, reducer: R) -> R::Output
    where
        I: Send,
        T: Send,
        F: Fn(I) -> Option<T> + Sync,
        R: Reducer<T>,
    {
        let (tx, rx) = mpsc::channel::<T>();

        thread::scope(|scope| {
            let reducing = scope.spawn(move || {
                let mut reducer = reducer;
                for item in rx {
                    reducer.absorb(item);
                }
                reducer.finish()
            });

            self.pool.install(|| {
                items.into_par_iter().for_each_with(tx, |tx, item| {
                    if let Some(out) = map(item) {
                        // the receiver outlives every sender
                        let _ = tx.send(out);
                    }
                });
            });

            match reducing.join() {
                Ok(output) => output,
                Err(payload) => panic::resume_unwind(payload),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sum(u64);

    impl Reducer<u64> for Sum {
        type Output = u64;

        fn absorb(&mut self, item: u64) {
            self.0 += item;
        }

        fn finish(self) -> u64 {
            self.0
        }
    }

    #[test]
    fn zero_workers_is_a_config_error() {
        assert!(matches!(WorkerPool::new(0), Err(GitstatsError::Config(_))));
    }

    #[test]
    fn run_sees_every_mapped_item() {
        let pool = WorkerPool::new(4).unwrap();
        assert_eq!(pool.workers(), 4);
        let items: Vec<u64> = (1..=1000).collect();
        let total = pool.run(items, |n| (n % 2 == 0).then_some(n), Sum(0));
        assert_eq!(total, (1..=1000).filter(|n| n % 2 == 0).sum::<u64>());
    }

    #[test]
    fn run_with_no_items_finishes() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.run(Vec::<u64>::new(), Some, Sum(7)), 7);
    }
}
