use ndarray::{Array1, Array2, array};
use popde::{
    Algorithm, DeAdapter, Population, PopdeError, Problem, ProblemHandle, RESERVED_KEYS,
    SolverOptions, UnsupportedProperty,
};
use serde_json::json;

/// Sphere with configurable capabilities; constraints are evaluated as zero.
#[derive(Default)]
struct Shaped {
    nobj: usize,
    nec: usize,
    nic: usize,
    stochastic: bool,
}

impl Shaped {
    fn plain() -> Self {
        Self { nobj: 1, ..Self::default() }
    }
}

impl Problem for Shaped {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        let mut f = Array1::zeros(self.nobj + self.nec + self.nic);
        for k in 0..self.nobj {
            f[k] = x.dot(x) + k as f64;
        }
        f
    }
    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (array![-5.0, -5.0], array![5.0, 5.0])
    }
    fn nobj(&self) -> usize {
        self.nobj
    }
    fn nec(&self) -> usize {
        self.nec
    }
    fn nic(&self) -> usize {
        self.nic
    }
    fn is_stochastic(&self) -> bool {
        self.stochastic
    }
    fn name(&self) -> String {
        "Shaped".to_string()
    }
}

struct Snapshot {
    x: Array2<f64>,
    f: Array2<f64>,
    ids: Vec<u64>,
    fevals: u64,
}

fn snapshot(pop: &Population) -> Snapshot {
    Snapshot {
        x: pop.get_x(),
        f: pop.get_f(),
        ids: pop.get_ids().to_vec(),
        fevals: pop.problem().fevals(),
    }
}

fn assert_unchanged(pop: &Population, before: &Snapshot) {
    assert_eq!(pop.get_x(), before.x);
    assert_eq!(pop.get_f(), before.f);
    assert_eq!(pop.get_ids(), before.ids.as_slice());
    assert_eq!(pop.problem().fevals(), before.fevals);
}

fn expect_shape_error(problem: Shaped, property: UnsupportedProperty) {
    let mut pop = Population::new(ProblemHandle::new(problem).unwrap(), 10, 4).unwrap();
    let before = snapshot(&pop);
    let mut algo = DeAdapter::new(SolverOptions::new()).unwrap();

    let err = algo.evolve_in_place(&mut pop).unwrap_err();
    assert!(err.is_problem_shape_error());
    match err {
        PopdeError::UnsupportedProblem { property: got, ref problem } => {
            assert_eq!(got, property);
            assert_eq!(problem, "Shaped");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_unchanged(&pop, &before);
    assert!(algo.result().is_none());
}

#[test]
fn test_every_reserved_key_is_rejected() {
    for (key, _) in RESERVED_KEYS {
        let opts = SolverOptions::new().with("maxiter", 10).with(key, json!(null));
        let err = DeAdapter::new(opts).unwrap_err();
        assert!(err.is_argument_error());
        match err {
            PopdeError::InvalidArgument { key: got, .. } => assert_eq!(got, key),
            other => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn test_reserved_key_message() {
    let err = DeAdapter::new(SolverOptions::new().with("popsize", 20)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the \"popsize\" parameter must not be passed to the constructor of the DE adapter, as \
         the population will be provided by the caller of evolve"
    );
}

#[test]
fn test_constrained_problem_rejected() {
    expect_shape_error(Shaped { nic: 1, ..Shaped::plain() }, UnsupportedProperty::Constrained);
    expect_shape_error(Shaped { nec: 2, ..Shaped::plain() }, UnsupportedProperty::Constrained);
}

#[test]
fn test_multi_objective_problem_rejected() {
    expect_shape_error(Shaped { nobj: 2, ..Shaped::plain() }, UnsupportedProperty::MultiObjective);
}

#[test]
fn test_stochastic_problem_rejected() {
    expect_shape_error(
        Shaped { stochastic: true, ..Shaped::plain() },
        UnsupportedProperty::Stochastic,
    );
}

#[test]
fn test_checks_run_in_order() {
    // constraints are reported before the objective count and stochasticity
    expect_shape_error(
        Shaped { nobj: 2, nec: 1, nic: 0, stochastic: true },
        UnsupportedProperty::Constrained,
    );
    expect_shape_error(
        Shaped { nobj: 2, stochastic: true, ..Shaped::plain() },
        UnsupportedProperty::MultiObjective,
    );
}

#[test]
fn test_empty_population_skips_solver() {
    // an option the solver would refuse shows the solver is never reached
    let mut algo = DeAdapter::new(SolverOptions::new().with("no_such_option", 1)).unwrap();
    let pop = Population::new(ProblemHandle::new(Shaped::plain()).unwrap(), 0, 0).unwrap();

    let pop = algo.evolve(pop).unwrap();
    assert!(pop.is_empty());
    assert_eq!(pop.problem().fevals(), 0);
    assert!(algo.result().is_none());
}

#[test]
fn test_empty_population_still_checks_problem() {
    let mut algo = DeAdapter::new(SolverOptions::new()).unwrap();
    let problem = Shaped { nic: 1, ..Shaped::plain() };
    let pop = Population::new(ProblemHandle::new(problem).unwrap(), 0, 0).unwrap();
    assert!(algo.evolve(pop).unwrap_err().is_problem_shape_error());
}

#[test]
fn test_solver_errors_pass_through() {
    let mut pop = Population::new(ProblemHandle::new(Shaped::plain()).unwrap(), 10, 9).unwrap();
    let before = snapshot(&pop);

    let mut algo = DeAdapter::new(SolverOptions::new().with("no_such_option", 1)).unwrap();
    let err = algo.evolve_in_place(&mut pop).unwrap_err();
    assert!(err.is_solver_error());
    assert_eq!(
        err.to_string(),
        "differential_evolution() got an unexpected option \"no_such_option\""
    );
    assert_unchanged(&pop, &before);

    // five members cannot feed rand2bin
    let mut small = Population::new(ProblemHandle::new(Shaped::plain()).unwrap(), 5, 9).unwrap();
    let mut algo = DeAdapter::new(SolverOptions::new().with("strategy", "rand2bin")).unwrap();
    match algo.evolve_in_place(&mut small).unwrap_err() {
        PopdeError::Solver(inner) => assert!(inner.is_config_error()),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(algo.result().is_none());
}
