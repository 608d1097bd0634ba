//! # Multi-class refinement
//!
//! Refinement policy for K class grids kept next to each other. A point selected for
//! refinement is looked up in the combined grid and its class record decides:
//! 1. **top classes**: the point is added to every class grid whose density at the point is
//!    within `top_percent` of the dominant one;
//! 2. **neighbors**: for every recorded neighbor Q (a point dominated by another class),
//!    P and Q are added to the grids of both dominant classes, and the child between them
//!    along the recorded dimension is generated from the deeper of the two and added to
//!    both grids as well;
//! 3. **borders**: if the border pressure of the point beats the running average, its
//!    children in the recorded border directions go into the dominant class grid.
//!
//! Points are only ever added, never removed, and every insertion is conditional, so
//! refining the same point twice changes nothing the second time.
use crate::refinement::border::BorderAccumulator;
use crate::refinement::combined_grid::MultipleClassGrid;
use crate::refinement::policy::{RefinementMethod, RefinementPolicy, ensure_point};
use crate::sparse_grid::grid_point::hierarchical_child;
use crate::sparse_grid::{GridPoint, GridStorage, SparseGridError};
use log::{debug, info};
use tabled::{builder::Builder, settings::Style};

pub struct MultipleClassRefinement<'a> {
    grids: &'a mut MultipleClassGrid,
    border: BorderAccumulator,
    top_percent: f64,
    /// points inserted per class grid since construction
    inserted: Vec<usize>,
    skipped: usize,
}

impl<'a> MultipleClassRefinement<'a> {
    pub fn new(
        grids: &'a mut MultipleClassGrid,
        border: BorderAccumulator,
        top_percent: f64,
    ) -> Self {
        let inserted = vec![0; grids.num_classes()];
        MultipleClassRefinement {
            grids,
            border,
            top_percent,
            inserted,
            skipped: 0,
        }
    }

    pub fn top_percent(&self) -> f64 {
        self.top_percent
    }

    pub fn border_accumulator(&self) -> BorderAccumulator {
        self.border
    }

    /// replaces the border pressure average, for the next cycle
    pub fn set_border_accumulator(&mut self, border: BorderAccumulator) {
        self.border = border;
    }

    pub fn inserted(&self) -> &[usize] {
        &self.inserted
    }

    /// number of selected points that were not tracked by the combined grid
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn grids(&self) -> &MultipleClassGrid {
        &*self.grids
    }

    /// table of points added per class grid, logged at info level
    pub fn log_statistics(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["class", "points", "inserted"]);
        for (class_id, grid) in self.grids.class_grids.iter().enumerate() {
            builder.push_record([
                class_id.to_string(),
                grid.len().to_string(),
                self.inserted[class_id].to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        let table = table.to_string();
        info!("\n \n MULTIPLE CLASS REFINEMENT \n \n {}", table);
        table
    }

    // conditional insert into one class grid, counting what was new
    fn add_to_class(&mut self, class_id: usize, point: &GridPoint) -> Result<(), SparseGridError> {
        let classes = self.grids.class_grids.len();
        let grid = self
            .grids
            .class_grids
            .get_mut(class_id)
            .ok_or(SparseGridError::IndexOutOfRange {
                what: "class grid",
                index: class_id,
                len: classes,
            })?;
        if ensure_point(grid, point)? {
            self.inserted[class_id] += 1;
            debug!("point {} added to class {}", point, class_id);
        }
        Ok(())
    }
}

impl RefinementPolicy for MultipleClassRefinement<'_> {
    fn refine_gridpoint(
        &mut self,
        storage: &mut GridStorage,
        seq: usize,
    ) -> Result<(), SparseGridError> {
        let point = storage.point(seq)?.clone();
        let multi_seq = match self.grids.combined.sequence_number(&point) {
            Some(multi_seq) if multi_seq < self.grids.records.len() => multi_seq,
            _ => {
                debug!("point {} is not in the combined grid yet, skipped", point);
                self.skipped += 1;
                return Ok(());
            }
        };
        let record = self.grids.records[multi_seq].clone();
        let dominant = record.dominant_class()?;

        for entry in record.top_classes(self.top_percent) {
            self.add_to_class(entry.class_id, &point)?;
        }

        for neighbor in record.neighbors() {
            let neighbor_record = self.grids.record(neighbor.point).map_err(|_| {
                SparseGridError::IndexOutOfRange {
                    what: "neighbor",
                    index: neighbor.point,
                    len: self.grids.records.len(),
                }
            })?;
            let neighbor_dominant = neighbor_record.dominant_class()?;
            let neighbor_point = self.grids.combined.point(neighbor.point)?.clone();
            let dims = point.dim().min(neighbor_point.dim());
            if neighbor.dim >= dims {
                return Err(SparseGridError::IndexOutOfRange {
                    what: "neighbor dimension",
                    index: neighbor.dim,
                    len: dims,
                });
            }

            self.add_to_class(dominant, &point)?;
            self.add_to_class(neighbor_dominant, &point)?;
            self.add_to_class(dominant, &neighbor_point)?;
            self.add_to_class(neighbor_dominant, &neighbor_point)?;

            // the shallower point sees left and right mirrored
            let dim = neighbor.dim;
            let (source_level, source_index, is_left) =
                if point.level(dim) < neighbor_point.level(dim) {
                    let (level, index) = neighbor_point.get(dim);
                    (level, index, !neighbor.is_left)
                } else {
                    let (level, index) = point.get(dim);
                    (level, index, neighbor.is_left)
                };
            let (level, index) = hierarchical_child(source_level, source_index, is_left);
            let child = point.with(dim, level, index);
            self.add_to_class(dominant, &child)?;
            self.add_to_class(neighbor_dominant, &child)?;
        }

        let density = record.density(dominant)?;
        if self.border.admits(record.border_score(), density) {
            for border in record.borders() {
                if border.dim >= point.dim() {
                    return Err(SparseGridError::IndexOutOfRange {
                        what: "border dimension",
                        index: border.dim,
                        len: point.dim(),
                    });
                }
                self.add_to_class(dominant, &point.child(border.dim, border.is_left))?;
            }
        }
        Ok(())
    }

    fn method(&self) -> RefinementMethod {
        RefinementMethod::MultipleClass
    }
}
