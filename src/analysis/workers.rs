//! A module for spreading per-source computations over worker threads.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    graph::{MAX_NUM_THREADS, MIN_NUM_THREADS},
};

/// Calls `task` once for every source node in `0..num_nodes`, spread over `num_threads` workers.
///
/// Each worker grabs the next unprocessed node from a shared counter and keeps its own
/// accumulator, created with `init`. The accumulators are returned when every worker has
/// finished, to be combined by the caller.
pub(crate) fn for_each_source<T, I, F>(
    num_nodes: usize,
    num_threads: usize,
    init: I,
    task: F,
) -> Result<Vec<T>>
where
    T: Send,
    I: Fn() -> T + Sync,
    F: Fn(usize, &mut T) + Sync,
{
    let num_threads = num_threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
    let counter = AtomicUsize::new(0);
    let start = Instant::now();

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            let handle = scope.spawn(|| {
                let mut acc = init();
                loop {
                    let index = counter.fetch_add(1, Ordering::Relaxed);
                    if index >= num_nodes {
                        break;
                    }
                    if index % 100 == 0 {
                        debug!("node: {}, time: {:?}", index, start.elapsed());
                    }
                    task(index, &mut acc);
                }
                acc
            });
            handles.push(handle);
        }

        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| Error::Analysis("worker thread panicked".to_owned()))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_once() {
        for num_threads in [0, 1, 4] {
            let accs = for_each_source(250, num_threads, Vec::new, |i, acc: &mut Vec<usize>| {
                acc.push(i)
            })
            .unwrap();

            let mut seen: Vec<usize> = accs.into_iter().flatten().collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..250).collect::<Vec<_>>());
        }
    }

    #[test]
    fn no_sources() {
        let accs = for_each_source(0, 2, || 0, |_, acc: &mut usize| *acc += 1).unwrap();

        assert_eq!(accs.iter().sum::<usize>(), 0);
    }
}
