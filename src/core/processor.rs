//! Parallel batch execution over a fixed-size worker pool
//!
//! [`ParallelBatchProcessor`] maps a pure unary function across a batch of
//! inputs using a bounded number of OS threads and returns the outputs in
//! input order, whatever order the workers finished in. The pool is built
//! fresh for each batch and joined before the call returns, so a call is
//! fully synchronous from the caller's perspective and separate calls never
//! share execution state.
//!
//! The mapped function must not rely on shared mutable state: thread-based
//! workers do not give the process isolation a forked pool would, so that
//! requirement is part of the API contract here rather than something the
//! runtime enforces.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crossbeam::channel;
use tracing::{debug, info};

use crate::utils::error::{HarvestError, Result};

/// Executes a unary function over batches of inputs with bounded parallelism.
///
/// The only persistent state is the worker count; each [`process_batch`]
/// call owns its own pool, so concurrent calls on one instance are
/// independent of each other.
///
/// [`process_batch`]: ParallelBatchProcessor::process_batch
///
/// # Examples
///
/// ```
/// use dataharvest::core::processor::ParallelBatchProcessor;
///
/// let processor = ParallelBatchProcessor::with_workers(2)?;
/// let doubled = processor.process_batch(|x: i64| x * 2, vec![1, 2, 3, 4, 5])?;
/// assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
/// # Ok::<(), dataharvest::HarvestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParallelBatchProcessor {
    num_workers: usize,
}

impl Default for ParallelBatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelBatchProcessor {
    /// Create a processor sized to the host's logical CPU count.
    pub fn new() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }

    /// Create a processor with an explicit worker count.
    ///
    /// Fails with [`HarvestError::Config`] when the count is zero.
    pub fn with_workers(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(HarvestError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(Self { num_workers })
    }

    /// Number of workers spawned per batch.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Map an infallible function over `items`, preserving input order.
    ///
    /// A panic inside `func` fails the whole batch with
    /// [`HarvestError::BatchExecution`] carrying the failing item's index;
    /// no partial results are returned.
    pub fn process_batch<T, R, F>(&self, func: F, items: Vec<T>) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        self.try_process_batch(|item| Ok::<R, std::convert::Infallible>(func(item)), items)
    }

    /// Map a fallible function over `items`, preserving input order.
    ///
    /// The first failure (lowest item index, for determinism under any
    /// scheduling) fails the whole batch with
    /// [`HarvestError::BatchExecution`] wrapping the original error. Panics
    /// inside `func` are captured and reported the same way.
    pub fn try_process_batch<T, R, E, F>(&self, func: F, items: Vec<T>) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(T) -> std::result::Result<R, E> + Sync,
    {
        let total = items.len();
        if total == 0 {
            info!("Processed 0 items with {} workers", self.num_workers);
            return Ok(Vec::new());
        }

        let (task_tx, task_rx) = channel::unbounded::<(usize, T)>();
        let (outcome_tx, outcome_rx) = channel::unbounded::<(usize, ItemOutcome<R, E>)>();

        // The whole batch is enqueued up front; workers drain the queue and
        // exit when it closes.
        for task in items.into_iter().enumerate() {
            let _ = task_tx.send(task);
        }
        drop(task_tx);

        debug!("Dispatching {} items across {} workers", total, self.num_workers);

        let func = &func;
        std::thread::scope(|scope| {
            for _ in 0..self.num_workers {
                let task_rx = task_rx.clone();
                let outcome_tx = outcome_tx.clone();
                scope.spawn(move || {
                    while let Ok((index, item)) = task_rx.recv() {
                        let outcome = match catch_unwind(AssertUnwindSafe(|| func(item))) {
                            Ok(Ok(value)) => ItemOutcome::Ok(value),
                            Ok(Err(err)) => ItemOutcome::Failed(err),
                            Err(payload) => ItemOutcome::Panicked(panic_message(payload)),
                        };
                        if outcome_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(task_rx);
        drop(outcome_tx);

        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
        let mut first_failure: Option<(usize, ItemOutcome<R, E>)> = None;

        for (index, outcome) in outcome_rx {
            match outcome {
                ItemOutcome::Ok(value) => slots[index] = Some(value),
                failure => {
                    if first_failure.as_ref().is_none_or(|(i, _)| index < *i) {
                        first_failure = Some((index, failure));
                    }
                }
            }
        }

        if let Some((index, failure)) = first_failure {
            return Err(HarvestError::BatchExecution {
                index,
                source: failure.into_cause(),
            });
        }

        let results: Vec<R> = slots.into_iter().flatten().collect();
        debug_assert_eq!(results.len(), total);

        info!("Processed {} items with {} workers", total, self.num_workers);
        Ok(results)
    }
}

enum ItemOutcome<R, E> {
    Ok(R),
    Failed(E),
    Panicked(String),
}

impl<R, E> ItemOutcome<R, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_cause(self) -> Box<dyn std::error::Error + Send + Sync> {
        match self {
            ItemOutcome::Ok(_) => unreachable!("successful items are never converted to causes"),
            ItemOutcome::Failed(err) => Box::new(err),
            ItemOutcome::Panicked(message) => Box::new(WorkerPanic(message)),
        }
    }
}

/// Cause recorded when the mapped function panicked inside a worker.
#[derive(Debug)]
pub struct WorkerPanic(String);

impl fmt::Display for WorkerPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker panicked: {}", self.0)
    }
}

impl std::error::Error for WorkerPanic {}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
