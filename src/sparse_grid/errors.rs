use std::fmt;

/// Error types for sparse grid storage and refinement
///
/// Every variant is a contract violation: refinement is deterministic and in-memory,
/// so nothing here is worth retrying. A point that is simply not tracked yet is not an
/// error and never shows up as one.
#[derive(Debug, Clone, PartialEq)]
pub enum SparseGridError {
    /// record has no classes at all
    EmptyRecord,
    /// sequence number, neighbor id or dimension beyond the container it addresses
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// class id unknown to a record or to the list of class grids
    UnknownClass { class_id: usize, classes: usize },
    /// two collections that must agree in size do not
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidConfig(String),
    Logger(String),
}

impl fmt::Display for SparseGridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SparseGridError::EmptyRecord => write!(f, "class point record holds no classes"),
            SparseGridError::IndexOutOfRange { what, index, len } => {
                write!(f, "{} index {} out of range (length {})", what, index, len)
            }
            SparseGridError::UnknownClass { class_id, classes } => {
                write!(f, "unknown class {} (number of classes {})", class_id, classes)
            }
            SparseGridError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch in {}: expected {}, found {}",
                what, expected, found
            ),
            SparseGridError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            SparseGridError::Logger(msg) => write!(f, "Logger error: {}", msg),
        }
    }
}

impl std::error::Error for SparseGridError {}
