//! examples of usage of RustedSparseGrid
/// hash and multi-class refinement examples
pub mod refinement_examples;
