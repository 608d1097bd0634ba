//! Refinement pass.
//!
//! One call of [`RefinementDriver::refine`]:
//! 1. scores every point of the storage and keeps the best `refinements_num`;
//! 2. refines, best first, each collected point whose score reaches the threshold, with the
//!    policy the driver was built with.
//!
//! A policy error aborts the pass; the points already inserted stay in place.
use crate::Utils::logger::{elapsed_time, statistics_table};
use crate::refinement::collection::collect_refinable_points;
use crate::refinement::functor::RefinementFunctor;
use crate::refinement::policy::RefinementPolicy;
use crate::sparse_grid::{GridStorage, SparseGridError};
use log::info;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct RefinementReport {
    /// points scored
    pub visited: usize,
    /// points collected under the cap
    pub collected: usize,
    /// collected points at or above the threshold, handed to the policy
    pub refined: usize,
    pub points_before: usize,
    pub points_after: usize,
    pub elapsed: Duration,
}

impl RefinementReport {
    pub fn statistics(&self) -> HashMap<String, String> {
        let (unit, time) = elapsed_time(self.elapsed);
        HashMap::from([
            ("points visited".to_string(), self.visited.to_string()),
            ("points collected".to_string(), self.collected.to_string()),
            ("points refined".to_string(), self.refined.to_string()),
            ("grid size before".to_string(), self.points_before.to_string()),
            ("grid size after".to_string(), self.points_after.to_string()),
            ("time elapsed,".to_string() + unit.as_str(), format!("{}", time)),
        ])
    }
}

pub struct RefinementDriver<P: RefinementPolicy> {
    policy: P,
}

impl<P: RefinementPolicy> RefinementDriver<P> {
    pub fn new(policy: P) -> Self {
        RefinementDriver { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn into_policy(self) -> P {
        self.policy
    }

    pub fn refine<F>(
        &mut self,
        storage: &mut GridStorage,
        functor: &F,
    ) -> Result<RefinementReport, SparseGridError>
    where
        F: RefinementFunctor + ?Sized,
    {
        let begin = Instant::now();
        let points_before = storage.len();
        let collection = collect_refinable_points(storage, functor);
        let threshold = functor.threshold();
        let mut refined = 0;
        for (seq, score) in collection.ranked() {
            if score >= threshold {
                self.policy.refine_gridpoint(storage, seq)?;
                refined += 1;
            }
        }
        let report = RefinementReport {
            visited: points_before,
            collected: collection.len(),
            refined,
            points_before,
            points_after: storage.len(),
            elapsed: begin.elapsed(),
        };
        info!(
            "{} refinement: {} of {} collected points refined",
            self.policy.method(),
            refined,
            collection.len()
        );
        statistics_table("REFINEMENT STATISTICS", &report.statistics());
        Ok(report)
    }
}
