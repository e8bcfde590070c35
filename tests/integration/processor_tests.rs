//! Batch processor integration tests
//!
//! Verify the processor's externally observable contract: order
//! preservation, length invariants, failure semantics and worker-count
//! handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dataharvest::core::processor::ParallelBatchProcessor;
use dataharvest::utils::error::HarvestError;

#[derive(Debug, thiserror::Error)]
#[error("rejected value {0}")]
struct Rejected(i64);

/// Parallel results must equal the sequential map for every worker count
/// up to the batch size.
#[test]
fn test_matches_sequential_map_for_all_worker_counts() {
    let items: Vec<i64> = (0..16).collect();
    let expected: Vec<i64> = items.iter().map(|x| x * x + 1).collect();

    for workers in 1..=items.len() {
        let processor = ParallelBatchProcessor::with_workers(workers).unwrap();
        let results = processor
            .process_batch(|x: i64| x * x + 1, items.clone())
            .unwrap();
        assert_eq!(results, expected, "mismatch with {} workers", workers);
    }
}

/// Result length always equals input length.
#[test]
fn test_output_length_equals_input_length() {
    let processor = ParallelBatchProcessor::with_workers(3).unwrap();
    for size in [1usize, 2, 7, 50] {
        let items: Vec<usize> = (0..size).collect();
        let results = processor.process_batch(|x: usize| x, items).unwrap();
        assert_eq!(results.len(), size);
    }
}

/// Order is restored even when later items finish first.
#[test]
fn test_order_restored_under_skewed_completion_times() {
    let processor = ParallelBatchProcessor::with_workers(4).unwrap();
    let items: Vec<u64> = (0..8).collect();

    // Earlier items sleep longest, so workers finish in roughly reverse
    // submission order.
    let results = processor
        .process_batch(
            |x: u64| {
                std::thread::sleep(Duration::from_millis((8 - x) * 5));
                x * 2
            },
            items,
        )
        .unwrap();

    assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14]);
}

/// The doubling scenario: [1,2,3,4,5] with 2 workers.
#[test]
fn test_doubling_with_two_workers() {
    let processor = ParallelBatchProcessor::with_workers(2).unwrap();
    let results = processor
        .process_batch(|x: i64| x * 2, vec![1, 2, 3, 4, 5])
        .unwrap();
    assert_eq!(results, vec![2, 4, 6, 8, 10]);
}

/// Empty input returns an empty result without invoking the function.
#[test]
fn test_empty_batch_never_invokes_function() {
    let calls = AtomicUsize::new(0);
    let processor = ParallelBatchProcessor::with_workers(2).unwrap();

    let results = processor
        .process_batch(
            |x: i64| {
                calls.fetch_add(1, Ordering::SeqCst);
                x
            },
            vec![],
        )
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Zero workers is a configuration error.
#[test]
fn test_zero_workers_rejected() {
    let err = ParallelBatchProcessor::with_workers(0).unwrap_err();
    assert!(matches!(err, HarvestError::Config(_)));
}

/// A single failing item fails the whole batch and reports its index.
#[test]
fn test_single_failure_fails_batch_with_index() {
    let processor = ParallelBatchProcessor::with_workers(2).unwrap();
    let err = processor
        .try_process_batch(
            |x: i64| if x == 3 { Err(Rejected(x)) } else { Ok(x) },
            vec![1, 2, 3, 4],
        )
        .unwrap_err();

    match err {
        HarvestError::BatchExecution { index, ref source } => {
            assert_eq!(index, 2);
            assert_eq!(source.to_string(), "rejected value 3");
        }
        other => panic!("expected BatchExecution, got {:?}", other),
    }
}

/// No partial results escape a failed batch: the error is the only output.
#[test]
fn test_failure_returns_error_not_partial_results() {
    let processor = ParallelBatchProcessor::with_workers(4).unwrap();
    let outcome = processor.try_process_batch(
        |x: i64| if x == 0 { Err(Rejected(x)) } else { Ok(x) },
        (0..100).collect(),
    );
    assert!(outcome.is_err());
}

/// The pool is rebuilt per call, so a processor stays usable after a
/// failed batch.
#[test]
fn test_processor_usable_after_failure() {
    let processor = ParallelBatchProcessor::with_workers(2).unwrap();

    let failed = processor.try_process_batch(
        |x: i64| if x == 1 { Err(Rejected(x)) } else { Ok(x) },
        vec![0, 1],
    );
    assert!(failed.is_err());

    let results = processor.process_batch(|x: i64| x + 1, vec![1, 2, 3]).unwrap();
    assert_eq!(results, vec![2, 3, 4]);
}

/// More workers than items is fine.
#[test]
fn test_more_workers_than_items() {
    let processor = ParallelBatchProcessor::with_workers(8).unwrap();
    let results = processor.process_batch(|x: i64| -x, vec![1, 2]).unwrap();
    assert_eq!(results, vec![-1, -2]);
}

/// Non-Copy item and result types move through the pool cleanly.
#[test]
fn test_owned_string_items() {
    let processor = ParallelBatchProcessor::with_workers(3).unwrap();
    let items: Vec<String> = ["alpha", "beta", "gamma"].iter().map(|s| s.to_string()).collect();

    let results = processor
        .process_batch(|s: String| s.to_uppercase(), items)
        .unwrap();
    assert_eq!(results, vec!["ALPHA", "BETA", "GAMMA"]);
}
