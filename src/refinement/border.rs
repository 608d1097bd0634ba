use crate::refinement::class_point::ClassPointRecord;

/// Running border pressure over all records of a refinement cycle.
///
/// Owned by the caller and handed to the multi-class policy as a value. A record opens its
/// borders only when its own pressure `border_score * density(dominant)` exceeds the
/// average `sum / count` of this accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderAccumulator {
    pub sum: f64,
    pub count: f64,
}

impl BorderAccumulator {
    pub fn new(sum: f64, count: f64) -> Self {
        BorderAccumulator { sum, count }
    }

    /// accumulates every record that has at least one border
    pub fn from_records(records: &[ClassPointRecord]) -> Self {
        let mut accumulator = BorderAccumulator::default();
        for record in records {
            accumulator.observe(record);
        }
        accumulator
    }

    pub fn observe(&mut self, record: &ClassPointRecord) {
        if record.borders().is_empty() {
            return;
        }
        let Ok(dominant) = record.dominant_class() else {
            return;
        };
        let Ok(density) = record.density(dominant) else {
            return;
        };
        self.sum += record.border_score() * density;
        self.count += 1.0;
    }

    /// average border pressure; infinite while nothing was observed, which keeps every
    /// border closed
    pub fn ratio(&self) -> f64 {
        if self.count == 0.0 {
            return f64::INFINITY;
        }
        self.sum / self.count
    }

    /// whether a record with this border score and dominant density may open its borders
    pub fn admits(&self, border_score: f64, dominant_density: f64) -> bool {
        self.ratio() < border_score * dominant_density
    }
}
