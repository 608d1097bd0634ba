#[cfg(test)]
mod tests {
    use crate::refinement::{
        BorderAccumulator, BoxedClassFunction, ClassPointRecord, ClosureRefinementFunctor,
        MultipleClassGrid, MultipleClassRefinement, RefinementDriver, RefinementMethod,
        RefinementPolicy,
    };
    use crate::sparse_grid::{GridPoint, GridStorage};
    use nalgebra::DVector;

    fn record(densities: &[f64]) -> ClassPointRecord {
        let mut record = ClassPointRecord::new(densities.len());
        for (class_id, &density) in densities.iter().enumerate() {
            record.update_class(class_id, density, false).unwrap();
        }
        record
    }

    fn combined_of(points: &[GridPoint]) -> GridStorage {
        let mut combined = GridStorage::new(points[0].dim());
        for p in points {
            combined.insert(p.clone()).unwrap();
        }
        combined
    }

    #[test]
    fn test_top_class_propagation() {
        let p = GridPoint::from_level_index(&[(1, 1), (2, 3)]);
        let combined = combined_of(&[p.clone()]);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(2), GridStorage::new(2)],
            combined.clone(),
            vec![record(&[0.8, 0.2])],
        )
        .unwrap();
        let mut storage = combined;
        let mut policy =
            MultipleClassRefinement::new(&mut grids, BorderAccumulator::default(), 0.3);
        policy.refine_gridpoint(&mut storage, 0).unwrap();

        assert!(grids.class_grid(0).unwrap().contains(&p));
        assert!(!grids.class_grid(1).unwrap().contains(&p));
        assert_eq!(grids.class_grid(0).unwrap().len(), 1);
    }

    #[test]
    fn test_deeper_neighbor_flips_side() {
        let p = GridPoint::from_level_index(&[(1, 1), (2, 3)]);
        let q = GridPoint::from_level_index(&[(2, 1), (2, 3)]);
        let combined = combined_of(&[p.clone(), q.clone()]);
        let mut p_record = record(&[1.0, 0.0]);
        p_record.add_neighbor(1, 0, true);
        let q_record = record(&[0.1, 0.9]);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(2), GridStorage::new(2)],
            combined.clone(),
            vec![p_record, q_record],
        )
        .unwrap();
        let mut storage = combined;
        let mut policy =
            MultipleClassRefinement::new(&mut grids, BorderAccumulator::default(), 0.3);
        policy.refine_gridpoint(&mut storage, 0).unwrap();

        // source is q's (2, 1), left turns into right: child (3, 2 * 1 + 1)
        let child = GridPoint::from_level_index(&[(3, 3), (2, 3)]);
        for class_id in 0..2 {
            let grid = grids.class_grid(class_id).unwrap();
            assert!(grid.contains(&p));
            assert!(grid.contains(&q));
            assert!(grid.contains(&child));
            assert_eq!(grid.len(), 3);
        }
        // the point handed to the policy is untouched
        assert_eq!(storage.point(0).unwrap(), &p);
    }

    #[test]
    fn test_shallower_neighbor_keeps_side() {
        let p = GridPoint::from_level_index(&[(2, 3)]);
        let q = GridPoint::from_level_index(&[(1, 1)]);
        let combined = combined_of(&[p.clone(), q.clone()]);
        let mut p_record = record(&[0.0, 1.0]);
        p_record.add_neighbor(1, 0, true);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(1), GridStorage::new(1)],
            combined.clone(),
            vec![p_record, record(&[1.0, 0.0])],
        )
        .unwrap();
        let mut storage = combined;
        let mut policy =
            MultipleClassRefinement::new(&mut grids, BorderAccumulator::default(), 0.5);
        policy.refine_gridpoint(&mut storage, 0).unwrap();

        // left child of p itself, between q at 0.5 and p at 0.75
        let child = GridPoint::from_level_index(&[(3, 5)]);
        assert!(grids.class_grid(0).unwrap().contains(&child));
        assert!(grids.class_grid(1).unwrap().contains(&child));
    }

    #[test]
    fn test_border_gate_closed() {
        let p = GridPoint::from_level_index(&[(1, 1), (1, 1)]);
        let combined = combined_of(&[p.clone()]);
        let mut p_record = record(&[0.8, 0.1]);
        // border score 0.5, pressure 0.5 * 0.8 = 0.4
        p_record.add_border(1, 1, false);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(2), GridStorage::new(2)],
            combined.clone(),
            vec![p_record],
        )
        .unwrap();
        let mut storage = combined;
        let border = BorderAccumulator::new(10.0, 20.0);
        let mut policy = MultipleClassRefinement::new(&mut grids, border, 0.5);
        policy.refine_gridpoint(&mut storage, 0).unwrap();

        let grid = grids.class_grid(0).unwrap();
        assert_eq!(grid.len(), 1);
        assert!(!grid.contains(&p.child(1, false)));
    }

    #[test]
    fn test_border_gate_open() {
        let p = GridPoint::from_level_index(&[(1, 1), (1, 1)]);
        let combined = combined_of(&[p.clone()]);
        let mut p_record = record(&[0.8, 0.1]);
        p_record.add_border(1, 1, false);
        // stored level only weighs the score, the child comes from the live level
        p_record.add_border(0, 7, true);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(2), GridStorage::new(2)],
            combined.clone(),
            vec![p_record],
        )
        .unwrap();
        let mut storage = combined;
        let mut policy =
            MultipleClassRefinement::new(&mut grids, BorderAccumulator::new(1.0, 4.0), 0.5);
        policy.refine_gridpoint(&mut storage, 0).unwrap();

        let grid = grids.class_grid(0).unwrap();
        assert!(grid.contains(&GridPoint::from_level_index(&[(1, 1), (2, 3)])));
        assert!(grid.contains(&GridPoint::from_level_index(&[(2, 1), (1, 1)])));
        assert!(grids.class_grid(1).unwrap().is_empty());
    }

    #[test]
    fn test_zero_percent_adds_nothing_by_itself() {
        let p = GridPoint::new(1);
        let combined = combined_of(&[p.clone()]);
        let mut grids = MultipleClassGrid::from_parts(
            vec![GridStorage::new(1), GridStorage::new(1)],
            combined.clone(),
            vec![record(&[0.6, 0.3])],
        )
        .unwrap();
        let mut storage = combined;
        let mut policy =
            MultipleClassRefinement::new(&mut grids, BorderAccumulator::default(), 0.0);
        policy.refine_gridpoint(&mut storage, 0).unwrap();
        assert!(grids.class_grids().iter().all(|g| g.is_empty()));
    }

    #[test]
    fn test_refinement_cycle_over_two_classes() {
        let functions: Vec<BoxedClassFunction> = vec![
            Box::new(|x: &DVector<f64>| (1.0 - x[0]) * (1.0 - x[1])),
            Box::new(|x: &DVector<f64>| x[0] * x[1]),
        ];
        let class_grids = vec![GridStorage::regular(2, 2), GridStorage::regular(2, 2)];
        let mut grids = MultipleClassGrid::new(class_grids, &functions).unwrap();
        let sizes_before: Vec<usize> = grids.class_grids().iter().map(|g| g.len()).collect();
        let mut storage = grids.combined().clone();
        let border = grids.border_accumulator();

        let functor = ClosureRefinementFunctor::new(|p: &GridPoint| p.level_sum() as f64, 5, 0.0);
        let policy = MultipleClassRefinement::new(&mut grids, border, 0.2);
        let mut driver = RefinementDriver::new(policy);
        let report = driver.refine(&mut storage, &functor).unwrap();
        assert_eq!(driver.policy().method(), RefinementMethod::MultipleClass);
        assert_eq!(report.refined, 5);
        // the refined storage itself is only read
        assert_eq!(report.points_after, report.points_before);
        let inserted: usize = driver.policy().inserted().iter().sum();
        drop(driver);

        let sizes_after: Vec<usize> = grids.class_grids().iter().map(|g| g.len()).collect();
        let grown: usize = sizes_after
            .iter()
            .zip(&sizes_before)
            .map(|(a, b)| a - b)
            .sum();
        assert_eq!(grown, inserted);
        assert!(grown > 0);

        let combined_before = grids.combined().len();
        grids.rebuild(&functions).unwrap();
        assert!(grids.combined().len() >= combined_before);
        assert_eq!(grids.records().len(), grids.combined().len());
    }
}
