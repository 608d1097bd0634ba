//! Collection of refinable points.
//!
//! One pass over the storage scores every point with the refinement functor and keeps the
//! `refinements_num` best (sequence number, score) pairs. Scoring is independent per point and
//! runs on the rayon pool; the scores are then fed into the capped collection in storage
//! order by a single sequential step, so the result does not depend on scheduling.
use crate::refinement::functor::RefinementFunctor;
use crate::sparse_grid::GridStorage;
use log::debug;
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct RefinementCollection {
    capacity: usize,
    entries: Vec<(usize, f64)>,
}

impl RefinementCollection {
    pub fn with_capacity(capacity: usize) -> Self {
        RefinementCollection {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// appends while there is room; once full the pair replaces the current minimum,
    /// if it scores strictly higher
    pub fn add_element(&mut self, seq: usize, score: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() < self.capacity {
            self.entries.push((seq, score));
            return;
        }
        let min_position = self
            .entries
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.1.total_cmp(&b.1.1))
            .map(|(i, _)| i);
        if let Some(i) = min_position {
            if score > self.entries[i].1 {
                self.entries[i] = (seq, score);
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// pairs in collection order
    pub fn iter(&self) -> impl Iterator<Item = &(usize, f64)> {
        self.entries.iter()
    }

    /// pairs ordered by score, highest first; equal scores keep collection order
    pub fn ranked(&self) -> Vec<(usize, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// visits every stored point once and returns the best `functor.refinements_num()` of them
pub fn collect_refinable_points<F>(storage: &GridStorage, functor: &F) -> RefinementCollection
where
    F: RefinementFunctor + ?Sized,
{
    let scores: Vec<f64> = (0..storage.len())
        .into_par_iter()
        .map(|seq| functor.eval(storage, seq))
        .collect();
    let mut collection = RefinementCollection::with_capacity(functor.refinements_num());
    for (seq, score) in scores.into_iter().enumerate() {
        collection.add_element(seq, score);
    }
    debug!(
        "scored {} points, {} collected for refinement",
        storage.len(),
        collection.len()
    );
    collection
}
