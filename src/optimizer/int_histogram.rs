//! Equal-width histogram over an integer column.
//!
//! ```text
//!   min                                                   max
//!    │◀─ w ─▶│◀─ w ─▶│          ...           │◀─ w ─▶│
//!    ┌───────┬───────┬────────────────────────┬───────┐
//!    │  h0   │  h1   │                        │ hB-1  │
//!    └───────┴───────┴────────────────────────┴───────┘
//!       bucket(v) = (v - min) / w,  bucket(min) = 0,  bucket(max) = B - 1
//! ```
//!
//! Each bucket keeps only a count, so a value inside a bucket is assumed to
//! be uniformly spread over the bucket's `w` integers.

use std::fmt;

use crate::execution::CompareOp;

/// Fixed-size histogram of integer values in `[min, max]`.
///
/// # Example
/// ```
/// use heapdb::execution::CompareOp;
/// use heapdb::optimizer::IntHistogram;
///
/// let mut hist = IntHistogram::new(10, 1, 100);
/// for v in 1..=100 {
///     hist.add_value(v);
/// }
/// let sel = hist.estimate_selectivity(CompareOp::GreaterThan, 50);
/// assert!((sel - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct IntHistogram {
    min: i64,
    max: i64,
    width: i64,
    heights: Vec<u64>,
    total: u64,
}

impl IntHistogram {
    /// Create a histogram of `buckets` bins spanning `min..=max`.
    ///
    /// The bin width is `ceil((max - min) / buckets)`, and at least 1.
    ///
    /// # Panics
    /// Panics if `buckets` is zero or `min > max`.
    pub fn new(buckets: usize, min: i32, max: i32) -> Self {
        assert!(buckets > 0, "a histogram needs at least one bucket");
        assert!(min <= max, "histogram range is empty: {} > {}", min, max);

        let (min, max) = (min as i64, max as i64);
        let span = max - min;
        let width = ((span + buckets as i64 - 1) / buckets as i64).max(1);

        Self {
            min,
            max,
            width,
            heights: vec![0; buckets],
            total: 0,
        }
    }

    #[inline]
    pub fn min(&self) -> i32 {
        self.min as i32
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max as i32
    }

    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.heights.len()
    }

    /// Number of values added so far.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Record one occurrence of `v`. Values outside `[min, max]` are ignored.
    pub fn add_value(&mut self, v: i32) {
        let v = v as i64;
        if v < self.min || v > self.max {
            return;
        }
        let bucket = self.bucket_of(v);
        self.heights[bucket] += 1;
        self.total += 1;
    }

    /// Estimated fraction of the added values that satisfy `value op v`.
    ///
    /// Always in `[0, 1]`. An empty histogram estimates 0 for any
    /// predicate that depends on bucket contents.
    pub fn estimate_selectivity(&self, op: CompareOp, v: i32) -> f64 {
        let v = v as i64;
        let sel = match op {
            CompareOp::Equals | CompareOp::Like => self.equals(v),
            CompareOp::NotEquals => 1.0 - self.equals(v),
            CompareOp::GreaterThan => self.greater_than(v),
            CompareOp::GreaterThanOrEq => self.greater_than(v) + self.equals(v),
            CompareOp::LessThan => self.less_than(v),
            CompareOp::LessThanOrEq => self.less_than(v) + self.equals(v),
        };
        sel.clamp(0.0, 1.0)
    }

    fn bucket_of(&self, v: i64) -> usize {
        let last = self.heights.len() - 1;
        if v == self.min {
            0
        } else if v == self.max {
            last
        } else {
            (((v - self.min) / self.width) as usize).min(last)
        }
    }

    /// Share of all values that fall in `bucket`.
    fn share(&self, bucket: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.heights[bucket] as f64 / self.total as f64
        }
    }

    fn equals(&self, v: i64) -> f64 {
        if v < self.min || v > self.max {
            return 0.0;
        }
        self.share(self.bucket_of(v)) / self.width as f64
    }

    fn greater_than(&self, v: i64) -> f64 {
        if v < self.min {
            return if self.total == 0 { 0.0 } else { 1.0 };
        }
        if v >= self.max {
            return 0.0;
        }
        let bucket = self.bucket_of(v);
        let right = self.min + self.width * (bucket as i64 + 1) - 1;
        let part = ((right - v) as f64 / self.width as f64).clamp(0.0, 1.0);
        let above: f64 = (bucket + 1..self.heights.len()).map(|b| self.share(b)).sum();
        self.share(bucket) * part + above
    }

    fn less_than(&self, v: i64) -> f64 {
        if v <= self.min {
            return 0.0;
        }
        if v > self.max {
            return if self.total == 0 { 0.0 } else { 1.0 };
        }
        let bucket = self.bucket_of(v);
        let left = self.min + self.width * bucket as i64;
        let part = ((v - left) as f64 / self.width as f64).clamp(0.0, 1.0);
        let below: f64 = (0..bucket).map(|b| self.share(b)).sum();
        self.share(bucket) * part + below
    }
}

impl fmt::Display for IntHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntHistogram[{}..={}, width {}, {} values]:",
            self.min, self.max, self.width, self.total
        )?;
        for (i, h) in self.heights.iter().enumerate() {
            if *h > 0 {
                write!(f, " {}:{}", i, h)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform_1_to_100() -> IntHistogram {
        let mut hist = IntHistogram::new(10, 1, 100);
        for v in 1..=100 {
            hist.add_value(v);
        }
        hist
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_width_rounds_up() {
        let hist = IntHistogram::new(10, 1, 100);
        assert_eq!(hist.width, 10);
        assert_eq!(hist.bucket_of(1), 0);
        assert_eq!(hist.bucket_of(100), 9);
        assert_eq!(hist.bucket_of(50), 4);
    }

    #[test]
    fn test_single_value_range() {
        let mut hist = IntHistogram::new(100, 7, 7);
        hist.add_value(7);
        hist.add_value(7);
        assert!(close(hist.estimate_selectivity(CompareOp::Equals, 7), 1.0));
        assert!(close(hist.estimate_selectivity(CompareOp::GreaterThan, 7), 0.0));
        assert!(close(hist.estimate_selectivity(CompareOp::LessThan, 7), 0.0));
        assert!(close(hist.estimate_selectivity(CompareOp::NotEquals, 7), 0.0));
    }

    #[test]
    fn test_uniform_estimates() {
        let hist = uniform_1_to_100();
        assert!(close(hist.estimate_selectivity(CompareOp::Equals, 37), 0.01));
        assert!(close(hist.estimate_selectivity(CompareOp::Like, 37), 0.01));
        assert!(close(hist.estimate_selectivity(CompareOp::NotEquals, 37), 0.99));
        assert!(close(hist.estimate_selectivity(CompareOp::GreaterThan, 50), 0.5));
        assert!(close(hist.estimate_selectivity(CompareOp::GreaterThanOrEq, 50), 0.51));
        assert!(close(hist.estimate_selectivity(CompareOp::LessThan, 50), 0.49));
        assert!(close(hist.estimate_selectivity(CompareOp::LessThanOrEq, 50), 0.5));
    }

    #[test]
    fn test_out_of_range_constants() {
        let hist = uniform_1_to_100();
        assert_eq!(hist.estimate_selectivity(CompareOp::Equals, 0), 0.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::Equals, 101), 0.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::GreaterThan, -5), 1.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::GreaterThan, 100), 0.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::LessThan, 1), 0.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::LessThan, 500), 1.0);
        assert_eq!(hist.estimate_selectivity(CompareOp::NotEquals, 500), 1.0);
    }

    #[test]
    fn test_skewed_distribution() {
        let mut hist = IntHistogram::new(10, 0, 99);
        for _ in 0..90 {
            hist.add_value(5);
        }
        for v in 90..100 {
            hist.add_value(v);
        }
        assert!(hist.estimate_selectivity(CompareOp::LessThan, 10) > 0.8);
        assert!(hist.estimate_selectivity(CompareOp::GreaterThan, 50) < 0.2);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = IntHistogram::new(10, 0, 100);
        for op in CompareOp::ALL {
            let sel = hist.estimate_selectivity(op, 50);
            if op == CompareOp::NotEquals {
                assert_eq!(sel, 1.0);
            } else {
                assert_eq!(sel, 0.0, "{}", op);
            }
        }
        assert_eq!(hist.estimate_selectivity(CompareOp::GreaterThan, -1), 0.0);
    }

    #[test]
    fn test_more_buckets_than_values() {
        let mut hist = IntHistogram::new(10, 0, 4);
        for v in 0..=4 {
            hist.add_value(v);
        }
        assert!(close(hist.estimate_selectivity(CompareOp::LessThan, 4), 0.8));
        assert!(close(hist.estimate_selectivity(CompareOp::Equals, 4), 0.2));
        assert!(close(hist.estimate_selectivity(CompareOp::GreaterThan, 3), 0.2));
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let mut hist = IntHistogram::new(100, i32::MIN, i32::MAX);
        hist.add_value(i32::MIN);
        hist.add_value(0);
        hist.add_value(i32::MAX);
        let sel = hist.estimate_selectivity(CompareOp::GreaterThan, 0);
        assert!((0.0..=1.0).contains(&sel));
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_display_lists_nonempty_buckets() {
        let mut hist = IntHistogram::new(4, 0, 7);
        hist.add_value(0);
        hist.add_value(7);
        assert_eq!(hist.to_string(), "IntHistogram[0..=7, width 2, 2 values]: 0:1 3:1");
    }

    fn op_strategy() -> impl Strategy<Value = CompareOp> {
        prop::sample::select(CompareOp::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn selectivity_is_a_fraction(
            values in prop::collection::vec(-1000i32..1000, 1..200),
            buckets in 1usize..50,
            op in op_strategy(),
            v in -1200i32..1200,
        ) {
            let min = *values.iter().min().unwrap();
            let max = *values.iter().max().unwrap();
            let mut hist = IntHistogram::new(buckets, min, max);
            for &x in &values {
                hist.add_value(x);
            }
            let sel = hist.estimate_selectivity(op, v);
            prop_assert!((0.0..=1.0).contains(&sel));
        }

        #[test]
        fn selectivity_sums_to_one(
            buckets in 2i32..=20,
            width in 1i32..=8,
            min in -500i32..500,
            seed in prop::collection::vec(0u32..1000, 1..300),
        ) {
            let max = min + buckets * width - 1;
            let mut hist = IntHistogram::new(buckets as usize, min, max);
            let span = (max - min + 1) as u32;
            for s in &seed {
                hist.add_value(min + (s % span) as i32);
            }

            let eq: f64 = (min..=max)
                .map(|v| hist.estimate_selectivity(CompareOp::Equals, v))
                .sum();
            let total = hist.estimate_selectivity(CompareOp::LessThan, min)
                + eq
                + hist.estimate_selectivity(CompareOp::GreaterThan, max);
            prop_assert!((total - 1.0).abs() < 1e-6, "total = {}", total);

            for v in min..=max {
                let split = hist.estimate_selectivity(CompareOp::LessThan, v)
                    + hist.estimate_selectivity(CompareOp::Equals, v)
                    + hist.estimate_selectivity(CompareOp::GreaterThan, v);
                prop_assert!((split - 1.0).abs() < 1e-6, "v = {}, split = {}", v, split);
            }
        }
    }
}
