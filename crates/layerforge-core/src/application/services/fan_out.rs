//! Fixed-size worker fan-out for independent filesystem operations.
//!
//! Items are claimed from a shared cursor, so a slow write never holds back
//! the rest of the batch. `run` returns only after every worker has been
//! joined; that join is the barrier between orchestration phases.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use tracing::{Span, trace};

/// Results of one batch, in completion order.
#[derive(Debug)]
pub(crate) struct Outcome<O, E> {
    pub succeeded: Vec<O>,
    pub failed: Vec<E>,
    /// Items never attempted because the batch was stopped early.
    pub skipped: usize,
}

/// Run `op` over `items` on at most `workers` threads.
///
/// With `stop_on_failure`, workers stop claiming new items once any item
/// has failed. Items already in flight still finish.
pub(crate) fn run<T, O, E, F>(
    label: &str,
    items: &[T],
    workers: usize,
    stop_on_failure: bool,
    op: F,
) -> Outcome<O, E>
where
    T: Sync,
    O: Send,
    E: Send,
    F: Fn(&T) -> Result<O, E> + Sync,
{
    let cursor = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let attempted = AtomicUsize::new(0);
    let succeeded = Mutex::new(Vec::with_capacity(items.len()));
    let failed = Mutex::new(Vec::new());

    let parent = Span::current();
    let work = || {
        let _entered = parent.enter();
        loop {
            if stop.load(Ordering::Acquire) {
                break;
            }
            let index = cursor.fetch_add(1, Ordering::AcqRel);
            let Some(item) = items.get(index) else {
                break;
            };
            attempted.fetch_add(1, Ordering::AcqRel);

            match op(item) {
                Ok(out) => lock(&succeeded).push(out),
                Err(err) => {
                    if stop_on_failure {
                        stop.store(true, Ordering::Release);
                    }
                    lock(&failed).push(err);
                }
            }
        }
    };

    let pool = workers.clamp(1, items.len().max(1));
    trace!(label, items = items.len(), workers = pool, "fan-out");

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(pool);
        for id in 0..pool {
            let spawned = thread::Builder::new()
                .name(format!("layerforge-{label}-{id}"))
                .spawn_scoped(scope, work);
            match spawned {
                Ok(handle) => handles.push(handle),
                // Out of threads: the caller becomes a worker.
                Err(_) => work(),
            }
        }
        for handle in handles {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
    });

    let attempted = attempted.into_inner();
    Outcome {
        succeeded: into_inner(succeeded),
        failed: into_inner(failed),
        skipped: items.len() - attempted,
    }
}

fn lock<V>(m: &Mutex<Vec<V>>) -> std::sync::MutexGuard<'_, Vec<V>> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn into_inner<V>(m: Mutex<Vec<V>>) -> Vec<V> {
    m.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
}
