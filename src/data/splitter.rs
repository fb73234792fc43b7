// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Test set:  the first ceil(fraction * n) shuffled samples
//   - Train set: everything else
//
// The same corpus and seed always give the same membership.
// StdRng::seed_from_u64 yields a stream that depends only on
// the seed.
//
// Both subsets keep the shuffled order.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::PipelineError;

/// Default seed for the train/test shuffle
pub const DEFAULT_SEED: u64 = 42;

/// Number of samples that go to the test subset.
/// Rounds up, so any positive fraction holds out at least one sample.
/// The product is taken in f64 before rounding, the same way HF
/// `train_test_split` counts, so 100 * 0.07 gives 8.
pub fn test_count(total: usize, test_fraction: f64) -> usize {
    ((total as f64) * test_fraction).ceil() as usize
}

/// Shuffle `samples` deterministically and split into (train, test).
///
/// # Errors
/// `InsufficientData` when either subset would end up empty,
/// which includes an empty input.
///
/// # Example
/// ```ignore
/// let (train, test) = split_train_test(all_examples, 0.1, 42)?;
/// ```
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>), PipelineError> {
    let total  = samples.len();
    let n_test = test_count(total, test_fraction);

    if n_test == 0 || n_test >= total {
        return Err(PipelineError::InsufficientData {
            examples: total,
            test_fraction,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // split_off(n) leaves [0..n) in `samples` and returns [n..)
    let train = samples.split_off(n_test);
    let test  = samples;

    tracing::debug!(
        "Dataset split: {} train, {} test (seed {})",
        train.len(),
        test.len(),
        seed,
    );

    Ok((train, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..1000).collect();
        let (train, test)     = split_train_test(items, 0.1, DEFAULT_SEED).unwrap();
        assert_eq!(test.len(),  100);
        assert_eq!(train.len(), 900);
    }

    #[test]
    fn test_test_count_rounds_up() {
        assert_eq!(test_count(15, 0.1), 2);
        assert_eq!(test_count(2, 0.1), 1);
        assert_eq!(test_count(0, 0.1), 0);
    }

    #[test]
    fn test_disjoint_and_exhaustive() {
        let items: Vec<usize> = (0..257).collect();
        let (train, test)     = split_train_test(items, 0.25, 7).unwrap();

        let train_set: HashSet<usize> = train.iter().copied().collect();
        let test_set:  HashSet<usize> = test.iter().copied().collect();

        assert!(train_set.is_disjoint(&test_set));
        let union: HashSet<usize> = train_set.union(&test_set).copied().collect();
        assert_eq!(union, (0..257).collect::<HashSet<_>>());
        assert_eq!(train.len() + test.len(), 257);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let items: Vec<usize> = (0..500).collect();
        let first  = split_train_test(items.clone(), 0.1, DEFAULT_SEED).unwrap();
        let second = split_train_test(items, 0.1, DEFAULT_SEED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_different_partition() {
        let items: Vec<usize> = (0..500).collect();
        let (_, a) = split_train_test(items.clone(), 0.1, 1).unwrap();
        let (_, b) = split_train_test(items, 0.1, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_dataset_is_insufficient() {
        let items: Vec<usize> = Vec::new();
        assert!(matches!(
            split_train_test(items, 0.1, DEFAULT_SEED),
            Err(PipelineError::InsufficientData { examples: 0, .. })
        ));
    }

    #[test]
    fn test_single_example_is_insufficient() {
        // ceil(1 * 0.1) = 1 leaves nothing for train
        assert!(matches!(
            split_train_test(vec![1], 0.1, DEFAULT_SEED),
            Err(PipelineError::InsufficientData { examples: 1, .. })
        ));
    }

    #[test]
    fn test_two_examples_split_one_each() {
        let (train, test) = split_train_test(vec!["a", "b"], 0.1, DEFAULT_SEED).unwrap();
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(),  1);
    }

    #[test]
    fn test_count_uses_float_product() {
        // 100.0 * 0.07 == 7.000000000000001 in f64
        assert_eq!(test_count(100, 0.07), 8);
        assert_eq!(test_count(1000, 0.1), 100);
    }
}
