use RustedSparseGrid::refinement::{
    BoxedClassFunction, HashRefinement, MultipleClassGrid, MultipleClassRefinement,
    RefinementDriver, SurplusRefinementFunctor, collect_refinable_points,
};
use RustedSparseGrid::sparse_grid::GridStorage;
use criterion::{Criterion, criterion_group, criterion_main};
use nalgebra::DVector;
use std::hint::black_box;

fn surplus_of(storage: &GridStorage) -> DVector<f64> {
    DVector::from_iterator(
        storage.len(),
        storage
            .points()
            .iter()
            .map(|p| 2f64.powi(-(p.level_sum() as i32)) * p.coordinate(0)),
    )
}

fn bench_collect(c: &mut Criterion) {
    let storage = GridStorage::regular(4, 6);
    let functor = SurplusRefinementFunctor::new(surplus_of(&storage), 50, 0.0);
    c.bench_function("collect refinable points, d=4 l=6", |b| {
        b.iter(|| collect_refinable_points(black_box(&storage), &functor))
    });
}

fn bench_hash_pass(c: &mut Criterion) {
    let initial = GridStorage::regular(3, 5);
    let functor = SurplusRefinementFunctor::new(surplus_of(&initial), 20, 0.0);
    c.bench_function("hash refinement pass, d=3 l=5", |b| {
        b.iter(|| {
            let mut storage = initial.clone();
            let mut driver = RefinementDriver::new(HashRefinement::new());
            driver.refine(&mut storage, &functor).unwrap()
        })
    });
}

fn bench_multiple_class_pass(c: &mut Criterion) {
    let classes: Vec<BoxedClassFunction> = vec![
        Box::new(|x: &DVector<f64>| (1.0 - x[0]) * (1.0 - x[1])),
        Box::new(|x: &DVector<f64>| x[0] * x[1]),
    ];
    let grids = MultipleClassGrid::new(
        vec![GridStorage::regular(2, 5), GridStorage::regular(2, 5)],
        &classes,
    )
    .unwrap();
    let functor = SurplusRefinementFunctor::new(surplus_of(grids.combined()), 20, 0.0);
    c.bench_function("multiple class refinement pass, d=2 l=5", |b| {
        b.iter(|| {
            let mut grids = grids.clone();
            let mut storage = grids.combined().clone();
            let border = grids.border_accumulator();
            let policy = MultipleClassRefinement::new(&mut grids, border, 0.2);
            let mut driver = RefinementDriver::new(policy);
            driver.refine(&mut storage, &functor).unwrap()
        })
    });
}

criterion_group!(benches, bench_collect, bench_hash_pass, bench_multiple_class_pass);
criterion_main!(benches);
