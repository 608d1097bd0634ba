//! Scoring functions used by refinement.
//!
//! - [`ClassFunction`]: the surrogate of one class (e.g. a density estimate), evaluated at the
//!   standard coordinates of a point. Any `Fn(&DVector<f64>) -> f64` is one.
//! - [`RefinementFunctor`]: refinement indicator, scores a stored point and carries how many
//!   points may be refined per pass and the threshold a score must reach.
use crate::sparse_grid::{GridPoint, GridStorage};
use nalgebra::DVector;

pub trait ClassFunction {
    fn eval(&self, x: &DVector<f64>) -> f64;
}

impl<F> ClassFunction for F
where
    F: Fn(&DVector<f64>) -> f64,
{
    fn eval(&self, x: &DVector<f64>) -> f64 {
        self(x)
    }
}

pub type BoxedClassFunction = Box<dyn ClassFunction + Send + Sync>;

/// Refinement indicator. Scoring must be free of side effects, points are scored in parallel.
pub trait RefinementFunctor: Sync {
    /// indicator value of the point stored under `seq`
    fn eval(&self, storage: &GridStorage, seq: usize) -> f64;

    /// maximal number of points collected per pass
    fn refinements_num(&self) -> usize;

    /// points scoring below this are not refined
    fn threshold(&self) -> f64;
}

/// Scores a point by the absolute value of its hierarchical surplus
#[derive(Debug, Clone)]
pub struct SurplusRefinementFunctor {
    pub alpha: DVector<f64>,
    pub refinements_num: usize,
    pub threshold: f64,
}

impl SurplusRefinementFunctor {
    pub fn new(alpha: DVector<f64>, refinements_num: usize, threshold: f64) -> Self {
        SurplusRefinementFunctor {
            alpha,
            refinements_num,
            threshold,
        }
    }
}

impl RefinementFunctor for SurplusRefinementFunctor {
    // points added after alpha was computed have no surplus yet and score 0
    fn eval(&self, _storage: &GridStorage, seq: usize) -> f64 {
        self.alpha.get(seq).map(|a| a.abs()).unwrap_or(0.0)
    }

    fn refinements_num(&self) -> usize {
        self.refinements_num
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// user defined indicator on the grid point itself
pub struct ClosureRefinementFunctor<F>
where
    F: Fn(&GridPoint) -> f64 + Sync,
{
    pub function: F,
    pub refinements_num: usize,
    pub threshold: f64,
}

impl<F> ClosureRefinementFunctor<F>
where
    F: Fn(&GridPoint) -> f64 + Sync,
{
    pub fn new(function: F, refinements_num: usize, threshold: f64) -> Self {
        ClosureRefinementFunctor {
            function,
            refinements_num,
            threshold,
        }
    }
}

impl<F> RefinementFunctor for ClosureRefinementFunctor<F>
where
    F: Fn(&GridPoint) -> f64 + Sync,
{
    fn eval(&self, storage: &GridStorage, seq: usize) -> f64 {
        storage
            .point(seq)
            .map(|point| (self.function)(point))
            .unwrap_or(0.0)
    }

    fn refinements_num(&self) -> usize {
        self.refinements_num
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}
