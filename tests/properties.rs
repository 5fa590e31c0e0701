//! Integration tests for the universal invariants and concrete scenarios.

use neighbors_engine::kernels::Kernel;
use neighbors_engine::sort::compare_distance;
use neighbors_engine::types::{
    DistanceMetric, COSINE_DISTANCE_METRIC, EUCLIDEAN_DISTANCE_METRIC,
};
use neighbors_engine::view::OwnedView;
use neighbors_engine::worker_pool;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

fn positions_2d_bytes(points: &[(f32, f32)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(points.len() * 8);
    for (x, y) in points {
        bytes.extend_from_slice(&x.to_ne_bytes());
        bytes.extend_from_slice(&y.to_ne_bytes());
    }
    bytes
}

fn positions_768d_bytes(points: &[[f32; 768]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(points.len() * 768 * 4);
    for values in points {
        for v in values {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
    }
    bytes
}

fn run_engine(metric: i8, dimensions: u16, position_bytes: &[u8]) -> OwnedView {
    let mut owned = OwnedView::new(metric, dimensions, position_bytes);
    let parameters = owned.parameters();
    let n = parameters.datapoint_amount as usize;
    let distance_metric = DistanceMetric::from_byte(metric).unwrap();
    {
        let view = owned.view();
        let kernel = Kernel::prepare(distance_metric, &view.positions);
        worker_pool::run(&kernel, &view.positions, n, view.pairs, view.ranks);
    }
    owned
}

fn assert_universal_invariants(view: &neighbors_engine::view::SharedView<'_>, cosine: bool) {
    let n = view.n;
    for i in 0..n {
        let row = &view.pairs[i * n..(i + 1) * n];
        let ranks_row = &view.ranks[i * n..(i + 1) * n];

        let mut indices: Vec<_> = row.iter().map(|p| p.index).collect();
        indices.sort();
        assert_eq!(indices, (0..n as u16).collect::<Vec<_>>(), "row {i} is not a permutation");

        for w in row.windows(2) {
            assert_ne!(compare_distance(w[0].distance, w[1].distance), std::cmp::Ordering::Greater);
        }

        for (j, pair) in row.iter().enumerate() {
            assert_eq!(ranks_row[pair.index as usize] as usize, j, "rank round-trip at row {i}");
        }

        assert_eq!(row[0].index as usize, i, "self not at rank 0 for row {i}");
        assert!(row[0].distance.abs() < 1e-4, "self-distance not ~0 for row {i}");

        for pair in row {
            assert!(pair.distance.is_finite() && pair.distance >= 0.0);
            if cosine {
                assert!(pair.distance <= 2.0 + 1e-4);
            }
        }
    }
}

#[test]
fn s1_single_point() {
    let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &positions_2d_bytes(&[(0.0, 0.0)]));
    let view = owned.view();
    assert_eq!(view.pairs[0].index, 0);
    assert_eq!(view.pairs[0].distance, 0.0);
    assert_eq!(view.ranks[0], 0);
}

#[test]
fn s2_euclidean_2d_right_triangle() {
    let points = [(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)];
    let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &positions_2d_bytes(&points));
    let view = owned.view();
    let row = |i: usize| &view.pairs[i * 3..(i + 1) * 3];
    assert_eq!(row(0)[0].index, 0);
    assert_eq!(row(0)[1].index, 1);
    assert_eq!(row(0)[2].index, 2);
    assert!((row(0)[1].distance - 3.0).abs() < 1e-4);
    assert!((row(0)[2].distance - 4.0).abs() < 1e-4);

    assert_eq!(row(1)[0].index, 1);
    assert_eq!(row(1)[1].index, 0);
    assert_eq!(row(1)[2].index, 2);
    assert!((row(1)[2].distance - 5.0).abs() < 1e-4);
}

#[test]
fn s3_cosine_2d_axis_points() {
    let points = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
    let mut owned = run_engine(COSINE_DISTANCE_METRIC, 2, &positions_2d_bytes(&points));
    let view = owned.view();
    let row0 = &view.pairs[0..4];
    assert_eq!(row0[0].index, 0);
    assert_eq!(row0[1].index, 1);
    assert_eq!(row0[2].index, 3);
    assert_eq!(row0[3].index, 2);
}

#[test]
fn s4_euclidean_768d_basis_vectors() {
    let mut e0 = [0.0f32; 768];
    let mut e1 = [0.0f32; 768];
    e0[0] = 1.0;
    e1[1] = 1.0;
    let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 768, &positions_768d_bytes(&[e0, e1]));
    let view = owned.view();
    assert_eq!(view.pairs[0].index, 0);
    assert_eq!(view.pairs[0].distance, 0.0);
    assert!((view.pairs[1].distance - std::f32::consts::SQRT_2).abs() < 1e-5);
    assert_eq!(view.pairs[2].index, 1);
    assert_eq!(view.pairs[2].distance, 0.0);
    assert!((view.pairs[3].distance - std::f32::consts::SQRT_2).abs() < 1e-5);
}

#[test]
fn s5_cosine_768d_identical_vectors() {
    let mut e0 = [0.0f32; 768];
    e0[0] = 1.0;
    let mut owned = run_engine(COSINE_DISTANCE_METRIC, 768, &positions_768d_bytes(&[e0, e0]));
    let view = owned.view();
    assert!(view.pairs[0].distance.abs() < 1e-6);
    assert!(view.pairs[1].distance.abs() < 1e-6);
    assert!(view.pairs[2].distance.abs() < 1e-6);
    assert!(view.pairs[3].distance.abs() < 1e-6);
}

#[test]
fn s6_euclidean_2d_matches_brute_force_on_random_points() {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<(f32, f32)> = (0..256)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();
    let n = points.len();
    let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &positions_2d_bytes(&points));
    let view = owned.view();

    for i in 0..n {
        let row = &view.pairs[i * n..(i + 1) * n];
        let mut brute: Vec<(f32, u16)> = points
            .iter()
            .enumerate()
            .map(|(j, &(x, y))| {
                let (qx, qy) = points[i];
                (((x - qx).powi(2) + (y - qy).powi(2)).sqrt(), j as u16)
            })
            .collect();
        brute.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)));

        for (pair, (expected_distance, _)) in row.iter().zip(brute.iter()) {
            assert!(
                (pair.distance - expected_distance).abs() <= 1e-5 * expected_distance.max(1.0),
                "row {i}: {} vs {expected_distance}",
                pair.distance
            );
        }
    }
}

#[test]
fn universal_invariants_hold_for_random_inputs_across_all_kernels() {
    let mut rng = StdRng::seed_from_u64(7);
    for &n in &[1usize, 2, 5, 17, 64] {
        let points_2d: Vec<(f32, f32)> = (0..n)
            .map(|_| (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect();

        let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &positions_2d_bytes(&points_2d));
        assert_universal_invariants(&owned.view(), false);

        let points_2d_nonzero: Vec<(f32, f32)> = points_2d
            .iter()
            .map(|&(x, y)| if x == 0.0 && y == 0.0 { (1.0, 0.0) } else { (x, y) })
            .collect();
        let mut owned = run_engine(COSINE_DISTANCE_METRIC, 2, &positions_2d_bytes(&points_2d_nonzero));
        assert_universal_invariants(&owned.view(), true);

        let component_dist = Uniform::new(-1.0f32, 1.0f32).unwrap();
        let points_768d: Vec<[f32; 768]> = (0..n)
            .map(|_| {
                let mut values = [0.0f32; 768];
                for v in values.iter_mut() {
                    *v = component_dist.sample(&mut rng);
                }
                values[0] += 0.5; // keep non-zero for cosine
                values
            })
            .collect();

        let mut owned = run_engine(EUCLIDEAN_DISTANCE_METRIC, 768, &positions_768d_bytes(&points_768d));
        assert_universal_invariants(&owned.view(), false);

        let mut owned = run_engine(COSINE_DISTANCE_METRIC, 768, &positions_768d_bytes(&points_768d));
        assert_universal_invariants(&owned.view(), true);
    }
}

#[test]
fn identical_input_produces_identical_output_across_runs() {
    let mut rng = StdRng::seed_from_u64(99);
    let points: Vec<(f32, f32)> = (0..64)
        .map(|_| (rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)))
        .collect();
    let bytes = positions_2d_bytes(&points);

    let mut first = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &bytes);
    let mut second = run_engine(EUCLIDEAN_DISTANCE_METRIC, 2, &bytes);

    let first_view = first.view();
    let second_view = second.view();
    for (a, b) in first_view.pairs.iter().zip(second_view.pairs.iter()) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.distance.to_bits(), b.distance.to_bits());
    }
    assert_eq!(first_view.ranks, second_view.ranks);
}
