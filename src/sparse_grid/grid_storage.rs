//! # Hash-indexed grid storage
//!
//! Points live in a `Vec` in insertion order, their position is the sequence number.
//! A `HashMap` from point to sequence number answers containment and lookup in O(1).
//! Points are never removed, so sequence numbers are stable for the lifetime of the storage.
use crate::sparse_grid::errors::SparseGridError;
use crate::sparse_grid::grid_point::{GridPoint, Index, Level};
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GridStorage {
    dim: usize,
    points: Vec<GridPoint>,
    map: HashMap<GridPoint, usize>,
}

impl GridStorage {
    pub fn new(dim: usize) -> Self {
        GridStorage {
            dim,
            points: Vec::new(),
            map: HashMap::new(),
        }
    }

    /// regular sparse grid: every point whose level vector satisfies
    /// `sum(l) <= level + dim - 1`, generated in order of increasing level sum
    pub fn regular(dim: usize, level: Level) -> Self {
        let mut storage = GridStorage::new(dim);
        if dim == 0 || level == 0 {
            return storage;
        }
        let max_sum = level + dim as Level - 1;
        let level_vectors = (0..dim)
            .map(|_| 1..=level)
            .multi_cartesian_product()
            .filter(|l| l.iter().sum::<Level>() <= max_sum)
            .sorted_by_key(|l| l.iter().sum::<Level>());
        for levels in level_vectors {
            let odd_indices = levels
                .iter()
                .map(|&l| (1..(1 as Index) << l).step_by(2))
                .multi_cartesian_product();
            for indices in odd_indices {
                let pairs: Vec<(Level, Index)> =
                    levels.iter().cloned().zip(indices.into_iter()).collect();
                storage.push(GridPoint::from_level_index(&pairs));
            }
        }
        debug!(
            "regular sparse grid of dimension {} and level {} has {} points",
            dim,
            level,
            storage.len()
        );
        storage
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: &GridPoint) -> bool {
        self.map.contains_key(point)
    }

    /// inserts the point under a fresh sequence number; a point that is already stored
    /// keeps (and returns) its old one. Points of another dimension are rejected.
    pub fn insert(&mut self, point: GridPoint) -> Result<usize, SparseGridError> {
        if point.dim() != self.dim {
            return Err(SparseGridError::DimensionMismatch {
                what: "grid point dimension",
                expected: self.dim,
                found: point.dim(),
            });
        }
        Ok(self.push(point))
    }

    fn push(&mut self, point: GridPoint) -> usize {
        if let Some(&seq) = self.map.get(&point) {
            return seq;
        }
        let seq = self.points.len();
        self.map.insert(point.clone(), seq);
        self.points.push(point);
        seq
    }

    pub fn sequence_number(&self, point: &GridPoint) -> Option<usize> {
        self.map.get(point).copied()
    }

    pub fn point(&self, seq: usize) -> Result<&GridPoint, SparseGridError> {
        self.points
            .get(seq)
            .ok_or(SparseGridError::IndexOutOfRange {
                what: "grid storage",
                index: seq,
                len: self.points.len(),
            })
    }

    /// (sequence number, point) pairs in sequence order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &GridPoint)> {
        self.points.iter().enumerate()
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }
}
