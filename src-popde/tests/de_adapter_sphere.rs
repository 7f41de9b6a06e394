use ndarray::{Array1, array};
use popde::{
    Algorithm, Benchmark, DeAdapter, Population, Problem, ProblemHandle, SolverOptions, Translate,
};

struct Sphere;

impl Problem for Sphere {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        array![x.dot(x)]
    }
    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (array![-5.0, -5.0], array![5.0, 5.0])
    }
}

fn sphere_population(seed: u64) -> Population {
    Population::new(ProblemHandle::new(Sphere).unwrap(), 10, seed).unwrap()
}

/// Evolve once and check the former worst individual now holds the solver's best point.
fn evolve_and_check(algo: &mut DeAdapter, mut pop: Population) -> Population {
    let worst = pop.worst_idx().unwrap();
    let f_before = pop.individual(worst).map(|(_, f)| f[0]).unwrap();
    let ids = pop.get_ids().to_vec();

    algo.evolve_in_place(&mut pop).unwrap();

    let report = algo.result().expect("result stored after evolve");
    let (x_after, f_after) = pop.individual(worst).unwrap();
    assert!(f_after[0] <= f_before, "{} > {}", f_after[0], f_before);
    assert_eq!(f_after[0], report.fun);
    assert_eq!(x_after, &report.x);
    assert_eq!(pop.len(), 10);
    assert_eq!(pop.get_ids(), ids.as_slice());
    pop
}

#[test]
fn test_worst_individual_receives_solver_best() {
    let mut algo = DeAdapter::new(SolverOptions::new().with("seed", 7).with("tol", 1e-8)).unwrap();
    let pop = sphere_population(1);
    let pop = evolve_and_check(&mut algo, pop);
    assert!(algo.result().unwrap().fun < 1e-4);
    assert_eq!(pop.champion_f().map(|f| f[0]), Some(algo.result().unwrap().fun));
}

#[test]
fn test_repeated_evolve_keeps_improving_worst() {
    let mut algo = DeAdapter::new(SolverOptions::new().with("maxiter", 3)).unwrap();
    let mut pop = sphere_population(2);
    for _ in 0..4 {
        pop = evolve_and_check(&mut algo, pop);
    }
}

#[test]
fn test_user_options_reach_the_solver() {
    let opts = SolverOptions::from_json_str(
        r#"{"strategy": "rand1exp", "maxiter": 2, "tol": 0.0, "mutation": 0.6, "seed": 5}"#,
    )
    .unwrap();
    let mut algo = DeAdapter::new(opts).unwrap();
    let pop = algo.evolve(sphere_population(3)).unwrap();
    let report = algo.result().unwrap();
    assert_eq!(report.nit, 2);
    // 10 initial evaluations then 10 trials per generation
    assert_eq!(report.nfev, 30);
    assert_eq!(pop.problem().fevals(), 10 + 30);
}

#[test]
fn test_translated_benchmark() {
    let shift = array![2.0, -1.0, 0.5];
    let problem = Translate::new(Benchmark::new("sphere", 3).unwrap(), shift.clone()).unwrap();
    let pop = Population::new(ProblemHandle::new(problem).unwrap(), 30, 11).unwrap();
    let mut algo =
        DeAdapter::new(SolverOptions::new().with("seed", 3).with("tol", 1e-10).with("maxiter", 600))
            .unwrap();
    let pop = algo.evolve(pop).unwrap();
    let champion = pop.champion_x().unwrap();
    assert!((champion - &shift).iter().all(|d| d.abs() < 1e-2), "champion {}", champion);
}
