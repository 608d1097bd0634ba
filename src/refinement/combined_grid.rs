//! # Per-class grids and their union
//!
//! Multi-class refinement works on K class grids at once. To give each point one sequence
//! number across classes, the union of all class grids is kept as a separate combined
//! storage, and records are indexed in parallel with it: `records[s]` belongs to the point
//! with combined sequence number `s`.
//!
//! Adjacency annotation (done by [`MultipleClassGrid::new`] and [`MultipleClassGrid::rebuild`]):
//! for every combined point P, dimension d and side s, with C the child of P on side s,
//! - C stored, and dominated by another class than P:  neighbor (C, d, s)
//! - C not stored:                                      border (d, level of P in d, s)
//! - parent of P along d stored, dominated by another class: neighbor (parent, d, side
//!   of the parent seen from P)
use crate::refinement::border::BorderAccumulator;
use crate::refinement::class_point::ClassPointRecord;
use crate::refinement::functor::BoxedClassFunction;
use crate::sparse_grid::{GridStorage, SparseGridError};
use log::info;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct MultipleClassGrid {
    pub(crate) class_grids: Vec<GridStorage>,
    pub(crate) combined: GridStorage,
    pub(crate) records: Vec<ClassPointRecord>,
}

impl MultipleClassGrid {
    /// builds the union grid and one record per union point from the class functions
    pub fn new(
        class_grids: Vec<GridStorage>,
        class_functions: &[BoxedClassFunction],
    ) -> Result<Self, SparseGridError> {
        check_dimensions(&class_grids)?;
        let mut grid = MultipleClassGrid {
            class_grids,
            combined: GridStorage::default(),
            records: Vec::new(),
        };
        grid.rebuild(class_functions)?;
        Ok(grid)
    }

    /// takes records populated by the caller. Records may be fewer than combined points,
    /// points without a record are ignored by refinement.
    pub fn from_parts(
        class_grids: Vec<GridStorage>,
        combined: GridStorage,
        records: Vec<ClassPointRecord>,
    ) -> Result<Self, SparseGridError> {
        check_dimensions(&class_grids)?;
        if combined.dim() != class_grids[0].dim() {
            return Err(SparseGridError::DimensionMismatch {
                what: "combined grid dimension",
                expected: class_grids[0].dim(),
                found: combined.dim(),
            });
        }
        if records.len() > combined.len() {
            return Err(SparseGridError::DimensionMismatch {
                what: "records of combined grid",
                expected: combined.len(),
                found: records.len(),
            });
        }
        if let Some(record) = records
            .iter()
            .find(|r| r.num_classes() != class_grids.len())
        {
            return Err(SparseGridError::DimensionMismatch {
                what: "classes of record",
                expected: class_grids.len(),
                found: record.num_classes(),
            });
        }
        Ok(MultipleClassGrid {
            class_grids,
            combined,
            records,
        })
    }

    /// recomputes union grid, records and adjacency from the current class grids
    pub fn rebuild(
        &mut self,
        class_functions: &[BoxedClassFunction],
    ) -> Result<(), SparseGridError> {
        let dim = self.class_grids.first().map(|g| g.dim()).unwrap_or(0);
        let mut combined = GridStorage::new(dim);
        for grid in &self.class_grids {
            for (_, point) in grid.iter() {
                combined.insert(point.clone())?;
            }
        }
        let class_grids = &self.class_grids;
        let mut records = combined
            .points()
            .par_iter()
            .map(|point| ClassPointRecord::from_point(point, class_grids, class_functions))
            .collect::<Result<Vec<ClassPointRecord>, SparseGridError>>()?;
        annotate_adjacency(&combined, &mut records)?;
        info!(
            "combined grid of {} classes holds {} points",
            self.class_grids.len(),
            combined.len()
        );
        self.combined = combined;
        self.records = records;
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        self.class_grids.len()
    }

    pub fn class_grids(&self) -> &[GridStorage] {
        &self.class_grids
    }

    pub fn class_grid(&self, class_id: usize) -> Result<&GridStorage, SparseGridError> {
        self.class_grids
            .get(class_id)
            .ok_or(SparseGridError::UnknownClass {
                class_id,
                classes: self.class_grids.len(),
            })
    }

    pub fn combined(&self) -> &GridStorage {
        &self.combined
    }

    pub fn records(&self) -> &[ClassPointRecord] {
        &self.records
    }

    pub fn record(&self, seq: usize) -> Result<&ClassPointRecord, SparseGridError> {
        self.records.get(seq).ok_or(SparseGridError::IndexOutOfRange {
            what: "class point record",
            index: seq,
            len: self.records.len(),
        })
    }

    pub fn record_mut(&mut self, seq: usize) -> Result<&mut ClassPointRecord, SparseGridError> {
        let len = self.records.len();
        self.records.get_mut(seq).ok_or(SparseGridError::IndexOutOfRange {
            what: "class point record",
            index: seq,
            len,
        })
    }

    pub fn border_accumulator(&self) -> BorderAccumulator {
        BorderAccumulator::from_records(&self.records)
    }

    pub fn into_class_grids(self) -> Vec<GridStorage> {
        self.class_grids
    }
}

fn check_dimensions(class_grids: &[GridStorage]) -> Result<(), SparseGridError> {
    let Some(first) = class_grids.first() else {
        return Err(SparseGridError::InvalidConfig(
            "at least one class grid is needed".to_string(),
        ));
    };
    if let Some(grid) = class_grids.iter().find(|g| g.dim() != first.dim()) {
        return Err(SparseGridError::DimensionMismatch {
            what: "class grid dimension",
            expected: first.dim(),
            found: grid.dim(),
        });
    }
    Ok(())
}

fn annotate_adjacency(
    combined: &GridStorage,
    records: &mut [ClassPointRecord],
) -> Result<(), SparseGridError> {
    let dominant = records
        .iter()
        .map(|r| r.dominant_class())
        .collect::<Result<Vec<usize>, SparseGridError>>()?;
    for (seq, point) in combined.iter() {
        let record = &mut records[seq];
        for dim in 0..point.dim() {
            for is_left in [true, false] {
                match combined.sequence_number(&point.child(dim, is_left)) {
                    Some(child) if dominant[child] != dominant[seq] => {
                        record.add_neighbor(child, dim, is_left)
                    }
                    Some(_) => {}
                    None => record.add_border(dim, point.level(dim), is_left),
                }
            }
            if let Some(parent_point) = point.parent(dim) {
                if let Some(parent) = combined.sequence_number(&parent_point) {
                    if dominant[parent] != dominant[seq] {
                        let parent_is_left = parent_point.coordinate(dim) < point.coordinate(dim);
                        record.add_neighbor(parent, dim, parent_is_left);
                    }
                }
            }
        }
    }
    Ok(())
}
