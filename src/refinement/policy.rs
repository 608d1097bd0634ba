//! # Refinement policies
//!
//! A policy decides what happens to the grids when one point is selected for refinement.
//! The driver is built around one policy, chosen at construction:
//! - [`HashRefinement`]: the standard spatially adaptive step, every missing hierarchical
//!   child of the point is added to the refined storage itself;
//! - [`MultipleClassRefinement`](crate::refinement::multiple_class::MultipleClassRefinement):
//!   the point and children derived from its class record are spread over per-class grids.
use crate::sparse_grid::{GridPoint, GridStorage, SparseGridError};
use strum_macros::{Display, EnumIter, EnumString};

/// Enumeration of available refinement policies, used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum RefinementMethod {
    /// children in every dimension, added to the refined storage
    #[strum(serialize = "hash")]
    Hash,
    /// density ranked propagation into per-class grids
    #[strum(serialize = "multiple_class")]
    MultipleClass,
}

pub trait RefinementPolicy {
    /// refines the point stored under `seq` in `storage`
    fn refine_gridpoint(
        &mut self,
        storage: &mut GridStorage,
        seq: usize,
    ) -> Result<(), SparseGridError>;

    fn method(&self) -> RefinementMethod;
}

/// inserts `point` unless `storage` already has it; true if it was inserted
pub fn ensure_point(storage: &mut GridStorage, point: &GridPoint) -> Result<bool, SparseGridError> {
    if storage.contains(point) {
        return Ok(false);
    }
    storage.insert(point.clone())?;
    Ok(true)
}

#[derive(Debug, Clone, Default)]
pub struct HashRefinement {
    /// number of points inserted since construction
    pub inserted: usize,
}

impl HashRefinement {
    pub fn new() -> Self {
        HashRefinement { inserted: 0 }
    }
}

impl RefinementPolicy for HashRefinement {
    fn refine_gridpoint(
        &mut self,
        storage: &mut GridStorage,
        seq: usize,
    ) -> Result<(), SparseGridError> {
        let point = storage.point(seq)?.clone();
        for dim in 0..point.dim() {
            for is_left in [true, false] {
                if ensure_point(storage, &point.child(dim, is_left))? {
                    self.inserted += 1;
                }
            }
        }
        Ok(())
    }

    fn method(&self) -> RefinementMethod {
        RefinementMethod::Hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ensure_point_idempotent() {
        let mut storage = GridStorage::new(1);
        let p = GridPoint::new(1);
        assert!(ensure_point(&mut storage, &p).unwrap());
        assert!(!ensure_point(&mut storage, &p).unwrap());
        assert_eq!(storage.len(), 1);
        assert!(ensure_point(&mut storage, &GridPoint::new(2)).is_err());
    }

    #[test]
    fn test_hash_refinement_adds_children() {
        let mut storage = GridStorage::regular(2, 1);
        let mut policy = HashRefinement::new();
        policy.refine_gridpoint(&mut storage, 0).unwrap();
        assert_eq!(storage.len(), 5);
        assert_eq!(policy.inserted, 4);
        assert!(storage.contains(&GridPoint::from_level_index(&[(2, 1), (1, 1)])));
        assert!(storage.contains(&GridPoint::from_level_index(&[(1, 1), (2, 3)])));
        // second time nothing is new
        policy.refine_gridpoint(&mut storage, 0).unwrap();
        assert_eq!(storage.len(), 5);
        assert!(policy.refine_gridpoint(&mut storage, 10).is_err());
    }

    #[test]
    fn test_method_names() {
        for method in RefinementMethod::iter() {
            let name = method.to_string();
            assert_eq!(RefinementMethod::from_str(&name).unwrap(), method);
        }
        assert_eq!(
            RefinementMethod::from_str("multiple_class").unwrap(),
            RefinementMethod::MultipleClass
        );
        assert!(RefinementMethod::from_str("surplus").is_err());
    }
}
