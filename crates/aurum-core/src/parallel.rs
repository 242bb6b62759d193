//! Conditional data parallelism.
//!
//! Uses rayon when the `parallel` feature is enabled, the policy allows it and
//! the collection is large enough. Only order-preserving operations are
//! offered: callers reduce the results sequentially so sums come out
//! bit-identical with or without the feature.

use serde::{Deserialize, Serialize};

/// When to switch from sequential to parallel iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelPolicy {
    /// Enable parallel processing (requires the `parallel` feature).
    pub enabled: bool,

    /// Minimum item count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub threshold: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 100,
        }
    }
}

impl ParallelPolicy {
    /// A policy that always runs sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for `count` items.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && count >= self.threshold
    }
}

/// Maps a function over items, conditionally using parallel iteration.
///
/// Output order always matches input order.
///
/// ```
/// use aurum_core::{maybe_parallel_map, ParallelPolicy};
///
/// let doubled = maybe_parallel_map(&[1, 2, 3], &ParallelPolicy::default(), |x| x * 2);
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], policy: &ParallelPolicy, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if policy.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Filters and maps items, conditionally using parallel iteration.
#[allow(unused_variables)]
pub fn maybe_parallel_filter_map<T, U, F>(items: &[T], policy: &ParallelPolicy, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Option<U> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if policy.should_parallelize(items.len()) {
            return items.par_iter().filter_map(f).collect();
        }
    }

    items.iter().filter_map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ParallelPolicy::default();
        assert!(policy.enabled);
        assert_eq!(policy.threshold, 100);
        assert!(!ParallelPolicy::sequential().enabled);
    }

    #[test]
    fn test_should_parallelize() {
        let policy = ParallelPolicy::default().with_threshold(10);
        assert!(!policy.should_parallelize(5));

        #[cfg(feature = "parallel")]
        assert!(policy.should_parallelize(10));

        #[cfg(not(feature = "parallel"))]
        assert!(!policy.should_parallelize(10));

        assert!(!ParallelPolicy::sequential().should_parallelize(1_000));
    }

    #[test]
    fn test_maybe_parallel_map_preserves_order() {
        let policy = ParallelPolicy::default().with_threshold(1);
        let items: Vec<u32> = (0..500).collect();
        let results = maybe_parallel_map(&items, &policy, |x| x * 3);
        assert_eq!(results, items.iter().map(|x| x * 3).collect::<Vec<_>>());
    }

    #[test]
    fn test_maybe_parallel_filter_map() {
        let policy = ParallelPolicy::sequential();
        let results: Vec<i32> =
            maybe_parallel_filter_map(&[1, 2, 3, 4, 5], &policy, |x| (*x > 2).then(|| x * 2));
        assert_eq!(results, vec![6, 8, 10]);
    }
}
