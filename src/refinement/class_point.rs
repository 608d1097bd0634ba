//! # Per-point class record
//!
//! For one point of the combined grid the record keeps, for every class,
//! - the density of that class' surrogate function at the point,
//! - whether the point is already part of that class' grid,
//!
//! together with a density-descending ranking of the classes and the adjacency facts
//! (neighbors in other dominant classes, open borders) that drive multi-class refinement.
//!
//! Entries are stored once, indexed by class id. The ranking only holds class ids, so an
//! update touches one entry and moves one id; the two views cannot drift apart.
use crate::refinement::functor::BoxedClassFunction;
use crate::sparse_grid::{GridPoint, GridStorage, Level, SparseGridError};
use indexmap::IndexSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassEntry {
    pub density: f64,
    pub class_id: usize,
    pub is_present: bool,
}

/// a combined grid point whose dominant class differs, and the side of it that needs a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor {
    pub point: usize,
    pub dim: usize,
    pub is_left: bool,
}

/// direction in which the class region of the point is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    pub dim: usize,
    pub level: Level,
    pub is_left: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClassPointRecord {
    classes: Vec<ClassEntry>,
    ranking: Vec<usize>,
    neighbors: IndexSet<Neighbor>,
    borders: IndexSet<Border>,
}

impl ClassPointRecord {
    /// all classes at density 0.0 and absent from their grids
    pub fn new(num_classes: usize) -> Self {
        let mut record = ClassPointRecord::default();
        for class_id in 0..num_classes {
            record.classes.push(ClassEntry {
                density: 0.0,
                class_id,
                is_present: false,
            });
            record.insert_ranked(class_id);
        }
        record
    }

    /// evaluates every class function at the coordinates of `point` and checks which class
    /// grids already contain it
    pub fn from_point(
        point: &GridPoint,
        class_grids: &[GridStorage],
        class_functions: &[BoxedClassFunction],
    ) -> Result<Self, SparseGridError> {
        if class_grids.len() != class_functions.len() {
            return Err(SparseGridError::DimensionMismatch {
                what: "class functions",
                expected: class_grids.len(),
                found: class_functions.len(),
            });
        }
        let coords = point.standard_coordinates();
        let mut record = ClassPointRecord::default();
        for (class_id, (grid, function)) in class_grids.iter().zip(class_functions).enumerate() {
            record.classes.push(ClassEntry {
                density: function.eval(&coords),
                class_id,
                is_present: grid.contains(point),
            });
            record.insert_ranked(class_id);
        }
        Ok(record)
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn dominant_class(&self) -> Result<usize, SparseGridError> {
        self.ranking
            .first()
            .copied()
            .ok_or(SparseGridError::EmptyRecord)
    }

    pub fn density(&self, class_id: usize) -> Result<f64, SparseGridError> {
        Ok(self.entry(class_id)?.density)
    }

    pub fn is_class_present(&self, class_id: usize) -> Result<bool, SparseGridError> {
        Ok(self.entry(class_id)?.is_present)
    }

    pub fn entry(&self, class_id: usize) -> Result<&ClassEntry, SparseGridError> {
        self.classes
            .get(class_id)
            .ok_or(SparseGridError::UnknownClass {
                class_id,
                classes: self.classes.len(),
            })
    }

    /// replaces the entry of `class_id` and moves it to its place in the ranking
    pub fn update_class(
        &mut self,
        class_id: usize,
        density: f64,
        is_present: bool,
    ) -> Result<(), SparseGridError> {
        let classes = self.classes.len();
        let entry = self
            .classes
            .get_mut(class_id)
            .ok_or(SparseGridError::UnknownClass { class_id, classes })?;
        *entry = ClassEntry {
            density,
            class_id,
            is_present,
        };
        self.ranking.retain(|&id| id != class_id);
        self.insert_ranked(class_id);
        Ok(())
    }

    /// entries ordered by density, highest first
    pub fn ranked(&self) -> impl Iterator<Item = &ClassEntry> + '_ {
        self.ranking.iter().map(|&id| &self.classes[id])
    }

    /// leading classes whose density is strictly above `(1 - percent) * dominant density`.
    /// With `percent == 0` the threshold equals the dominant density itself, so nothing
    /// passes, the dominant class included.
    pub fn top_classes(&self, percent: f64) -> Vec<ClassEntry> {
        let Some(&leader) = self.ranking.first() else {
            return Vec::new();
        };
        let min_density = (1.0 - percent) * self.classes[leader].density;
        self.ranked()
            .take_while(|entry| entry.density > min_density)
            .copied()
            .collect()
    }

    pub fn add_neighbor(&mut self, point: usize, dim: usize, is_left: bool) {
        self.neighbors.insert(Neighbor {
            point,
            dim,
            is_left,
        });
    }

    pub fn neighbors(&self) -> &IndexSet<Neighbor> {
        &self.neighbors
    }

    pub fn add_border(&mut self, dim: usize, level: Level, is_left: bool) {
        self.borders.insert(Border {
            dim,
            level,
            is_left,
        });
    }

    pub fn borders(&self) -> &IndexSet<Border> {
        &self.borders
    }

    /// level weighted number of open borders: sum of 2^-level
    pub fn border_score(&self) -> f64 {
        self.borders
            .iter()
            .map(|border| 0.5f64.powi(border.level as i32))
            .sum()
    }

    // first rank whose entry is strictly lower, or equal with a larger class id
    fn insert_ranked(&mut self, class_id: usize) {
        let density = self.classes[class_id].density;
        let position = self
            .ranking
            .iter()
            .position(|&id| {
                let other = self.classes[id].density;
                other < density || (other == density && id > class_id)
            })
            .unwrap_or(self.ranking.len());
        self.ranking.insert(position, class_id);
    }
}

impl fmt::Display for ClassPointRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "->\n")?;
        for c in &self.classes {
            write!(f, " - ({},{},{})", c.density, c.class_id, c.is_present)?;
        }
        write!(f, "\n")?;
        for c in self.ranked() {
            write!(f, " - ({},{})", c.density, c.class_id)?;
        }
        write!(f, "\nN:")?;
        for n in &self.neighbors {
            write!(f, " - ({},{},{})", n.point, n.dim, n.is_left)?;
        }
        write!(f, "\nB:")?;
        for b in &self.borders {
            write!(f, " - ({},{},{})", b.dim, b.level, b.is_left)?;
        }
        Ok(())
    }
}
