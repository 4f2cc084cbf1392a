#![cfg(feature = "parallel")]

use ndarray::{Array1, Array2};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use trapz_blocks::{BlockIntegrator, Degeneracy, Schedule};

/// Plain nested-loop rendition of the blockwise CDF, used as the baseline.
fn full_table(f: &Array2<f64>, x: &Array1<f64>, refs: &[usize]) -> Array2<f64> {
    let mut out = Array2::from_elem(f.dim(), 0.0);
    for c in 0..f.ncols() {
        for pair in refs.windows(2) {
            let (start, stop) = (pair[0], pair[1]);
            let mut cum = Vec::with_capacity(stop - start - 1);
            let mut acc = 0.0;
            for i in start..stop - 1 {
                acc += (x[i + 1] - x[i]) * (f[[i + 1, c]] + f[[i, c]]) * 0.5;
                cum.push(acc);
            }
            let total = cum[cum.len() - 1];
            for (k, v) in cum.iter().enumerate() {
                out[[start + 1 + k, c]] = v / total;
            }
        }
    }
    out
}

fn random_instance(
    rng: &mut StdRng,
    columns: usize,
    blocks: usize,
) -> (Array2<f64>, Array1<f64>, Vec<usize>) {
    let mut refs = vec![rng.gen_range(0..3)];
    for _ in 0..blocks {
        let last = refs[refs.len() - 1];
        refs.push(last + rng.gen_range(2..12));
    }
    let rows = refs[refs.len() - 1] + rng.gen_range(0..3);
    let mut x = Array1::from_elem(rows, 0.0);
    for i in 1..rows {
        x[i] = x[i - 1] + rng.gen_range(0.01..3.0);
    }
    let f = Array2::from_shape_fn((rows, columns), |_| rng.gen_range(0.0..100.0));
    (f, x, refs)
}

fn schedules() -> [Schedule; 3] {
    [
        Schedule::Serial,
        Schedule::Columns,
        Schedule::ColumnsAndBlocks,
    ]
}

#[test]
fn every_schedule_matches_baseline_bit_for_bit() {
    let mut rng = StdRng::seed_from_u64(42);
    for &(columns, blocks) in &[(1, 1), (1, 40), (16, 1), (8, 8), (3, 25)] {
        let (f, x, refs) = random_instance(&mut rng, columns, blocks);
        let baseline = full_table(&f, &x, &refs);
        for schedule in schedules() {
            let out = BlockIntegrator::builder()
                .with_schedule(schedule)
                .build()
                .integrate(f.view(), x.view(), &refs)
                .unwrap();
            assert_eq!(out, baseline, "{schedule:?} diverged for {columns}x{blocks}");
        }
    }
}

#[test]
fn propagated_nans_are_identical_across_schedules() {
    let mut rng = StdRng::seed_from_u64(7);
    let (mut f, x, refs) = random_instance(&mut rng, 4, 6);
    for r in refs[2]..refs[3] {
        f[[r, 1]] = 0.0;
    }
    let tables: Vec<_> = schedules()
        .into_iter()
        .map(|schedule| {
            BlockIntegrator::builder()
                .with_schedule(schedule)
                .with_degeneracy(Degeneracy::Propagate)
                .build()
                .integrate(f.view(), x.view(), &refs)
                .unwrap()
        })
        .collect();
    for table in &tables[1..] {
        for (a, b) in table.iter().zip(tables[0].iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
    assert!(tables[0][[refs[3] - 1, 1]].is_nan());
}

proptest! {
    #[test]
    fn parallel_matches_serial(seed in any::<u64>(), columns in 1usize..6, blocks in 1usize..12) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (f, x, refs) = random_instance(&mut rng, columns, blocks);
        let serial = BlockIntegrator::builder()
            .with_schedule(Schedule::Serial)
            .build()
            .integrate(f.view(), x.view(), &refs)
            .unwrap();
        let parallel = BlockIntegrator::builder()
            .with_schedule(Schedule::ColumnsAndBlocks)
            .build()
            .integrate(f.view(), x.view(), &refs)
            .unwrap();
        prop_assert_eq!(serial, parallel);
    }
}
