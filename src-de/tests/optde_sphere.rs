use ndarray::Array2;
use popde_de::{DEConfigBuilder, Init, Strategy, differential_evolution};
use popde_testfunctions::{get_function_bounds_vec, sphere};

#[test]
fn test_de_sphere_2d() {
    let b2 = vec![(-5.0, 5.0), (-5.0, 5.0)];
    let c2 = DEConfigBuilder::new()
        .seed(30)
        .maxiter(500)
        .popsize(30)
        .tol(1e-8)
        .strategy(Strategy::Rand1Bin)
        .recombination(0.8)
        .build();
    let report = differential_evolution(&sphere, &b2, c2).expect("valid configuration");
    assert!(report.fun < 1e-6, "fun = {}", report.fun);
}

#[test]
fn test_de_sphere_5d() {
    let b5 = get_function_bounds_vec("sphere", 5, (-5.0, 5.0));
    let c5 = DEConfigBuilder::new()
        .seed(31)
        .maxiter(800)
        .popsize(20)
        .tol(1e-8)
        .strategy(Strategy::Best1Bin)
        .recombination(0.9)
        .build();
    let report = differential_evolution(&sphere, &b5, c5).expect("valid configuration");
    assert!(report.fun < 1e-5, "fun = {}", report.fun);
}

#[test]
fn test_de_sphere_from_small_population() {
    // ten individuals, as a host framework would hand over
    let init = Array2::from_shape_fn((10, 2), |(i, j)| {
        let t = i as f64 / 9.0;
        if j == 0 { 4.5 - 9.0 * t } else { -4.0 + 8.0 * t * t }
    });
    let report = differential_evolution(
        &sphere,
        &[(-5.0, 5.0), (-5.0, 5.0)],
        DEConfigBuilder::new()
            .seed(12)
            .maxiter(1000)
            .tol(1e-6)
            .init(Init::Population(init))
            .build(),
    )
    .expect("valid configuration");
    assert_eq!(report.population.nrows(), 10);
    assert!(report.fun < 1e-3, "fun = {}", report.fun);
}
