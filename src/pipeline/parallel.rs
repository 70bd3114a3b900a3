use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

/// Map `items` through `process` on scoped threads.
///
/// Work runs in batches of at most `2 * jobs` items, one scoped thread per
/// item, so up to `2 * jobs` threads run at once. Results come back in input
/// order. `jobs <= 1` processes sequentially on the calling thread.
pub fn process_parallel<T, U, F>(items: Vec<T>, jobs: usize, process: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync,
{
    let worker_count = jobs.max(1);
    let in_flight_limit = worker_count.saturating_mul(2).max(1);
    let mut ordered = Vec::with_capacity(items.len());
    let mut indexed = items.into_iter().enumerate();

    loop {
        let batch: Vec<(usize, T)> = indexed.by_ref().take(in_flight_limit).collect();
        if batch.is_empty() {
            break;
        }

        if worker_count == 1 {
            ordered.extend(batch.into_iter().map(|(_, item)| process(item)));
            continue;
        }

        let (result_tx, result_rx) = mpsc::channel::<(usize, U)>();
        thread::scope(|scope| {
            for (index, item) in batch {
                let result_tx = result_tx.clone();
                let process = &process;
                scope.spawn(move || {
                    let _ = result_tx.send((index, process(item)));
                });
            }
        });
        drop(result_tx);

        let pending: BTreeMap<usize, U> = result_rx.into_iter().collect();
        ordered.extend(pending.into_values());
    }

    ordered
}

/// Worker count to use when the caller does not choose one.
pub fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1)
}
