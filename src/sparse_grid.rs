//! hash-indexed sparse grid storage and hierarchical grid points
/// (level, index) addressed grid point and its hierarchical child/parent arithmetic
pub mod grid_point;
/// insertion-ordered storage with O(1) point lookup
pub mod grid_storage;
/// error type shared by storage and refinement
pub mod errors;

pub use errors::SparseGridError;
pub use grid_point::{GridPoint, Index, Level};
pub use grid_storage::GridStorage;
