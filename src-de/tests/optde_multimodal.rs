use popde_de::{DEConfigBuilder, Mutation, Strategy, differential_evolution};
use popde_testfunctions::{ackley, get_function_bounds_vec, rastrigin, rosenbrock};

#[test]
fn test_de_rastrigin_2d() {
    let b2 = get_function_bounds_vec("rastrigin", 2, (-5.12, 5.12));
    let c2 = DEConfigBuilder::new()
        .seed(40)
        .maxiter(1000)
        .popsize(40)
        .tol(1e-8)
        .strategy(Strategy::Rand1Exp)
        .recombination(0.9)
        .build();
    let report = differential_evolution(&rastrigin, &b2, c2).unwrap();
    assert!(report.fun < 1e-2, "fun = {}", report.fun);
}

#[test]
fn test_de_ackley_3d() {
    let b3 = get_function_bounds_vec("ackley", 3, (-32.768, 32.768));
    let c3 = DEConfigBuilder::new()
        .seed(41)
        .maxiter(1000)
        .popsize(30)
        .tol(1e-10)
        .strategy(Strategy::Rand1Bin)
        .mutation(Mutation::Range { min: 0.5, max: 1.0 })
        .recombination(0.9)
        .build();
    let report = differential_evolution(&ackley, &b3, c3).unwrap();
    assert!(report.fun < 1e-3, "fun = {}", report.fun);
}

#[test]
fn test_de_rosenbrock_2d() {
    let b2 = get_function_bounds_vec("rosenbrock", 2, (-5.0, 10.0));
    let c2 = DEConfigBuilder::new()
        .seed(42)
        .maxiter(1000)
        .popsize(40)
        .tol(1e-10)
        .strategy(Strategy::RandToBest1Exp)
        .recombination(0.9)
        .build();
    let report = differential_evolution(&rosenbrock, &b2, c2).unwrap();
    assert!(report.fun < 1e-3, "fun = {}", report.fun);
    assert!((report.x[0] - 1.0).abs() < 0.1, "x[0] = {}", report.x[0]);
    assert!((report.x[1] - 1.0).abs() < 0.1, "x[1] = {}", report.x[1]);
}
