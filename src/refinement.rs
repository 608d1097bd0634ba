//! spatially adaptive refinement of hash-indexed sparse grids
/// per-point record: class densities ranked by density, neighbors, borders
pub mod class_point;
/// class surrogate functions and refinement indicators
pub mod functor;
/// capped collection of the best scored points of a pass
pub mod collection;
/// policy trait, standard hash refinement, method names
pub mod policy;
/// refinement over several per-class grids driven by class point records
pub mod multiple_class;
/// class grids, their union and the records indexed along it
pub mod combined_grid;
/// running border pressure average gating border extension
pub mod border;
/// refinement task parameters read from task documents
pub mod config;
/// refinement pass: collect, select by threshold, refine
pub mod driver;
mod refinement_tests;

pub use border::BorderAccumulator;
pub use class_point::{Border, ClassEntry, ClassPointRecord, Neighbor};
pub use collection::{RefinementCollection, collect_refinable_points};
pub use combined_grid::MultipleClassGrid;
pub use config::RefinementConfig;
pub use driver::{RefinementDriver, RefinementReport};
pub use functor::{
    BoxedClassFunction, ClassFunction, ClosureRefinementFunctor, RefinementFunctor,
    SurplusRefinementFunctor,
};
pub use multiple_class::MultipleClassRefinement;
pub use policy::{HashRefinement, RefinementMethod, RefinementPolicy, ensure_point};
