//! Weight-ordered buckets: ascending by weight, insertion order within a weight

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

#[derive(Debug, Clone)]
pub struct WeightBuckets<T> {
    buckets: BTreeMap<OrderedFloat<f64>, Vec<T>>,
    len: usize,
}

impl<T> WeightBuckets<T> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Add `item` under `weight`; items sharing a weight keep their insertion order
    pub fn insert(&mut self, weight: f64, item: T) {
        self.buckets.entry(OrderedFloat(weight)).or_default().push(item);
        self.len += 1;
    }

    /// Total number of items across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct weights
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets in ascending weight order
    pub fn buckets(&self) -> impl Iterator<Item = (f64, &[T])> + '_ {
        self.buckets.iter().map(|(w, items)| (w.0, items.as_slice()))
    }

    /// Items in visiting order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.values().flatten()
    }

    /// Item at `index` in visiting order
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Consume into `(weight, items)` pairs in ascending weight order
    pub fn into_buckets(self) -> impl Iterator<Item = (f64, Vec<T>)> {
        self.buckets.into_iter().map(|(w, items)| (w.0, items))
    }
}

impl<T> Default for WeightBuckets<T> {
    fn default() -> Self {
        Self::new()
    }
}
