//! # Hierarchical grid point
//!
//! A sparse grid point is addressed per dimension by a dyadic pair (level, index):
//! level >= 1, index odd, and the position along that dimension is `index / 2^level`.
//! Two points are equal iff every per-dimension pair matches, which is what the hash
//! storage keys on.
//!
//! The children of (l, i) along one dimension are
//! - left child:  (l + 1, 2i - 1)
//! - right child: (l + 1, 2i + 1)
//!
//! and the parent of (l, i) for l > 1 is the one of (l - 1, (i - 1) / 2), (l - 1, (i + 1) / 2)
//! with an odd index.
use nalgebra::DVector;
use std::fmt;

pub type Level = u32;
pub type Index = u32;

fn is_dyadic(level: Level, index: Index) -> bool {
    level >= 1 && index % 2 == 1 && (index as u64) < (1u64 << level)
}

/// (level, index) of the left or right hierarchical child of (level, index)
pub fn hierarchical_child(level: Level, index: Index, is_left: bool) -> (Level, Index) {
    debug_assert!(is_dyadic(level, index), "({}, {}) is not a grid coordinate", level, index);
    if is_left {
        (level + 1, 2 * index - 1)
    } else {
        (level + 1, 2 * index + 1)
    }
}

/// (level, index) of the hierarchical parent, None on level 1
pub fn hierarchical_parent(level: Level, index: Index) -> Option<(Level, Index)> {
    if level <= 1 {
        return None;
    }
    let lower = (index - 1) / 2;
    let parent_index = if lower % 2 == 1 { lower } else { lower + 1 };
    Some((level - 1, parent_index))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridPoint {
    level: Vec<Level>,
    index: Vec<Index>,
}

impl GridPoint {
    /// point (1, 1) in every dimension, i.e. the center of the unit cube
    pub fn new(dim: usize) -> Self {
        GridPoint {
            level: vec![1; dim],
            index: vec![1; dim],
        }
    }

    /// point from per-dimension (level, index) pairs
    pub fn from_level_index(pairs: &[(Level, Index)]) -> Self {
        debug_assert!(
            pairs.iter().all(|&(l, i)| is_dyadic(l, i)),
            "level >= 1 and odd index below 2^level expected, got {:?}",
            pairs
        );
        let (level, index) = pairs.iter().cloned().unzip();
        GridPoint { level, index }
    }

    pub fn dim(&self) -> usize {
        self.level.len()
    }

    pub fn get(&self, dim: usize) -> (Level, Index) {
        (self.level[dim], self.index[dim])
    }

    pub fn level(&self, dim: usize) -> Level {
        self.level[dim]
    }

    pub fn index(&self, dim: usize) -> Index {
        self.index[dim]
    }

    pub fn set(&mut self, dim: usize, level: Level, index: Index) {
        debug_assert!(is_dyadic(level, index), "({}, {}) is not a grid coordinate", level, index);
        self.level[dim] = level;
        self.index[dim] = index;
    }

    /// copy of this point with one dimension replaced
    pub fn with(&self, dim: usize, level: Level, index: Index) -> GridPoint {
        let mut point = self.clone();
        point.set(dim, level, index);
        point
    }

    /// copy of this point moved to its left/right child along `dim`
    pub fn child(&self, dim: usize, is_left: bool) -> GridPoint {
        let (level, index) = hierarchical_child(self.level[dim], self.index[dim], is_left);
        self.with(dim, level, index)
    }

    /// copy of this point moved to its parent along `dim`
    pub fn parent(&self, dim: usize) -> Option<GridPoint> {
        hierarchical_parent(self.level[dim], self.index[dim])
            .map(|(level, index)| self.with(dim, level, index))
    }

    pub fn level_sum(&self) -> Level {
        self.level.iter().sum()
    }

    pub fn level_max(&self) -> Level {
        self.level.iter().cloned().max().unwrap_or(0)
    }

    /// position along `dim` in [0, 1]
    pub fn coordinate(&self, dim: usize) -> f64 {
        self.index[dim] as f64 / 2f64.powi(self.level[dim] as i32)
    }

    pub fn standard_coordinates(&self) -> DVector<f64> {
        DVector::from_iterator(self.dim(), (0..self.dim()).map(|d| self.coordinate(d)))
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for d in 0..self.dim() {
            if d > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", self.level[d], self.index[d])?;
        }
        write!(f, "]")
    }
}
