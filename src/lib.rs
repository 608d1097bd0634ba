// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! Spatially adaptive refinement of hash-indexed sparse grids, including refinement of
//! several per-class grids guided by class densities, neighbors and borders.
//!
//! ```
//! use RustedSparseGrid::refinement::{HashRefinement, RefinementDriver, SurplusRefinementFunctor};
//! use RustedSparseGrid::sparse_grid::GridStorage;
//! use nalgebra::DVector;
//!
//! let mut storage = GridStorage::regular(2, 2);
//! // surplus grows with the sequence number, the last point is refined
//! let alpha = DVector::from_iterator(storage.len(), (0..storage.len()).map(|i| i as f64));
//! let functor = SurplusRefinementFunctor::new(alpha, 1, 0.0);
//! let mut driver = RefinementDriver::new(HashRefinement::new());
//! let report = driver.refine(&mut storage, &functor).unwrap();
//! assert_eq!(report.refined, 1);
//! assert!(storage.len() > 5);
//! ```
pub mod Examples;
pub mod Utils;
pub mod refinement;
pub mod sparse_grid;
