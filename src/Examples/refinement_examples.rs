use crate::Utils::logger::init_logger;
use crate::refinement::{
    BoxedClassFunction, ClosureRefinementFunctor, HashRefinement, MultipleClassGrid,
    MultipleClassRefinement, RefinementConfig, RefinementDriver, RefinementMethod,
    SurplusRefinementFunctor,
};
use crate::sparse_grid::{GridPoint, GridStorage};
use log::info;
use nalgebra::DVector;

// class 0 inside the disc of radius 0.3 around (0.5, 0.5), class 1 outside
fn disc_classes() -> Vec<BoxedClassFunction> {
    let inside = |x: &DVector<f64>| {
        let r = ((x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2)).sqrt();
        (-20.0 * (r - 0.3)).exp() / (1.0 + (-20.0 * (r - 0.3)).exp())
    };
    vec![
        Box::new(inside),
        Box::new(move |x: &DVector<f64>| 1.0 - inside(x)),
    ]
}

fn multiple_class_cycles(
    classes: Vec<BoxedClassFunction>,
    top_percent: f64,
    refinements_num: usize,
    cycles: usize,
) {
    let class_grids = vec![GridStorage::regular(2, 3); classes.len()];
    let mut grids = MultipleClassGrid::new(class_grids, &classes).unwrap();
    for cycle in 0..cycles {
        let mut storage = grids.combined().clone();
        let border = grids.border_accumulator();
        // points with many neighbors and borders first
        let combined = grids.combined().clone();
        let records = grids.records().to_vec();
        let functor = ClosureRefinementFunctor::new(
            move |p: &GridPoint| {
                combined
                    .sequence_number(p)
                    .and_then(|seq| records.get(seq))
                    .map(|r| (r.neighbors().len() + r.borders().len()) as f64)
                    .unwrap_or(0.0)
            },
            refinements_num,
            1.0,
        );
        let policy = MultipleClassRefinement::new(&mut grids, border, top_percent);
        let mut driver = RefinementDriver::new(policy);
        driver.refine(&mut storage, &functor).unwrap();
        driver.policy().log_statistics();
        grids.rebuild(&classes).unwrap();
        info!("cycle {}: combined grid holds {} points", cycle, grids.combined().len());
    }
}

pub fn refinement_examples(example: usize) {
    match example {
        0 => {
            // hash refinement by hierarchical surplus of f(x, y) = x * y
            let mut storage = GridStorage::regular(2, 2);
            for _ in 0..4 {
                let alpha = DVector::from_iterator(
                    storage.len(),
                    storage.points().iter().map(|p| {
                        let x = p.standard_coordinates();
                        x[0] * x[1] * 2f64.powi(-(p.level_sum() as i32))
                    }),
                );
                let functor = SurplusRefinementFunctor::new(alpha, 3, 0.0);
                let mut driver = RefinementDriver::new(HashRefinement::new());
                let report = driver.refine(&mut storage, &functor).unwrap();
                println!(
                    "refined {} points, grid grew from {} to {}",
                    report.refined, report.points_before, report.points_after
                );
            }
        }
        1 => {
            // two classes separated by a circle
            multiple_class_cycles(disc_classes(), 0.2, 10, 3);
        }
        2 => {
            // the same, parameters read from a task document
            let task = "
                refinement
                  method: multiple_class
                  classes: 2
                  top_percent: 0.3
                  refinements_num: 8
                logging
                  loglevel: info
            ";
            let config = RefinementConfig::from_task(task).unwrap();
            init_logger(config.loglevel.as_deref(), config.log_to_file).unwrap();
            match config.method {
                RefinementMethod::Hash => refinement_examples(0),
                RefinementMethod::MultipleClass => multiple_class_cycles(
                    disc_classes(),
                    config.top_percent,
                    config.refinements_num,
                    2,
                ),
            }
        }
        _ => {}
    }
}
