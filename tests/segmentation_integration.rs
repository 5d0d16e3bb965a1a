use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_partition::partition::{
    partition, FnProblem, Objective, PartitionConfig, PartitionProblem, PartitionRunner,
};
use u_partition::segmentation::L2Segmentation;

/// Piecewise-constant series with small uniform noise.
fn noisy_steps(levels: &[(f64, usize)], noise: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    levels
        .iter()
        .flat_map(|&(level, len)| std::iter::repeat_n(level, len))
        .map(|level| level + rng.random_range(-noise..noise))
        .collect()
}

#[test]
fn recovers_change_points_under_noise() {
    let series = noisy_steps(&[(0.0, 20), (10.0, 15), (-4.0, 25), (3.0, 10)], 0.5, 42);
    let problem = L2Segmentation::new(&series, 25.0).unwrap();

    let result = problem.segment().unwrap();

    assert_eq!(result.boundaries, vec![0, 20, 35, 60]);
    let means = problem.segment_means(&result);
    for (mean, expected) in means.iter().zip([0.0, 10.0, -4.0, 3.0]) {
        assert!((mean - expected).abs() < 0.5, "mean {mean} vs level {expected}");
    }
}

#[test]
fn change_points_survive_large_level_offset() {
    let levels = [(0.0, 20), (10.0, 15), (-4.0, 25), (3.0, 10)];
    let series = noisy_steps(&levels, 0.5, 42);
    let lifted: Vec<f64> = series.iter().map(|x| x + 1e9).collect();

    let base = L2Segmentation::new(&series, 25.0).unwrap().segment().unwrap();
    let problem = L2Segmentation::new(&lifted, 25.0).unwrap();
    let result = problem.segment().unwrap();

    assert_eq!(result.boundaries, vec![0, 20, 35, 60]);
    assert_eq!(result.boundaries, base.boundaries);
    for (mean, (level, _)) in problem.segment_means(&result).iter().zip(levels) {
        assert!((mean - 1e9 - level).abs() < 0.5, "mean {mean} vs level {level}");
    }
}

#[test]
fn closure_and_trait_paths_agree() {
    let series = noisy_steps(&[(1.0, 12), (6.0, 9), (2.0, 11)], 1.0, 7);
    let penalty = 8.0;
    let problem = L2Segmentation::new(&series, penalty).unwrap();

    let via_trait = problem.segment().unwrap();
    let via_closure = partition(
        &series,
        |d, from, to| {
            let seg = &d[from..to];
            let mean = seg.iter().sum::<f64>() / seg.len() as f64;
            seg.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() + penalty
        },
        Objective::Minimize,
    )
    .unwrap();

    assert_eq!(via_trait.boundaries, via_closure);
}

#[test]
fn shorter_max_segment_forces_more_partitions() {
    let series = vec![2.0; 30];
    let problem = L2Segmentation::new(&series, 1.0).unwrap();

    let free = PartitionRunner::run(&problem, &problem.config()).unwrap();
    let bounded =
        PartitionRunner::run(&problem, &problem.config().with_max_segment_len(7)).unwrap();

    assert_eq!(free.boundaries, vec![0]);
    assert_eq!(bounded.num_partitions(), 5);
    assert!(bounded.segments().all(|r| r.len() <= 7));
    assert!(bounded.score >= free.score);
}

#[test]
fn dp_beats_every_single_split() {
    let series = noisy_steps(&[(0.0, 10), (3.0, 10)], 2.0, 11);
    let problem = L2Segmentation::new(&series, 2.0).unwrap();
    let best = problem.segment().unwrap();

    for split in 1..series.len() {
        let alternative = PartitionRunner::score_boundaries(&problem, &[0, split]).unwrap();
        assert!(best.score <= alternative + 1e-9, "split at {split} beats the optimum");
    }
    let single = PartitionRunner::score_boundaries(&problem, &[0]).unwrap();
    assert!(best.score <= single + 1e-9);
}

#[test]
fn generic_elements_are_borrowed_not_copied() {
    #[derive(Debug)]
    struct Reading {
        station: &'static str,
    }

    let readings: Vec<Reading> = ["a", "a", "b", "b", "b", "a"]
        .into_iter()
        .map(|station| Reading { station })
        .collect();

    let problem = FnProblem::new(&readings, |r, from, to, _| {
        if r[from..to].iter().all(|x| x.station == r[from].station) {
            -1.0
        } else {
            f64::INFINITY
        }
    });
    let result = PartitionRunner::run(&problem, &PartitionConfig::default().minimize()).unwrap();

    assert_eq!(problem.len(), 6);
    assert_eq!(result.boundaries, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(readings[2].station, "b");
}
