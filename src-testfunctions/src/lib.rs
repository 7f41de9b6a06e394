//! Optimization test functions library
//!
//! A small collection of benchmark objectives used to exercise the popde
//! solver and the problems built on top of it. Every function comes with
//! metadata: default bounds, known global minima and typical dimensions.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use popde_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//!
//! let bounds = get_function_bounds_vec("sphere", 2, (-1.0, 1.0));
//! assert_eq!(bounds, vec![(-5.12, 5.12); 2]);
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Signature shared by all test functions
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function including bounds and known minima
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// The function itself
    pub function: TestFunction,
    /// Bounds for each dimension (min, max); a single pair applies to every dimension
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Typical dimension(s) for the function; a single 2 means 2D only
    pub dimensions: Vec<usize>,
}

impl FunctionMetadata {
    /// True when the function is only defined for a fixed dimension
    pub fn fixed_dimension(&self) -> Option<usize> {
        match self.dimensions.as_slice() {
            [d] => Some(*d),
            _ => None,
        }
    }
}


fn entry(
    name: &str,
    function: TestFunction,
    range: (f64, f64),
    minimum: f64,
    argmin: f64,
    multimodal: bool,
    description: &str,
) -> FunctionMetadata {
    FunctionMetadata {
        name: name.to_string(),
        function,
        bounds: vec![range],
        global_minima: vec![(vec![argmin; 2], minimum)],
        description: description.to_string(),
        multimodal,
        dimensions: vec![2, 5, 10],
    }
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    for meta in [
        entry("sphere", sphere, (-5.12, 5.12), 0.0, 0.0, false, "N-dimensional convex bowl"),
        entry("quadratic", quadratic, (-5.0, 5.0), 0.0, 1.0, false, "Shifted convex bowl"),
        entry("rosenbrock", rosenbrock, (-5.0, 10.0), 0.0, 1.0, false, "Curved narrow valley"),
        entry(
            "rotated_hyper_ellipsoid",
            rotated_hyper_ellipsoid,
            (-65.536, 65.536),
            0.0,
            0.0,
            false,
            "Ill-conditioned convex bowl",
        ),
        entry("zakharov", zakharov, (-5.0, 10.0), 0.0, 0.0, false, "Plate-shaped, no local minima"),
        entry("rastrigin", rastrigin, (-5.12, 5.12), 0.0, 0.0, true, "Regular grid of local minima"),
        entry("ackley", ackley, (-32.768, 32.768), 0.0, 0.0, true, "Flat outer region, deep hole"),
        entry("griewank", griewank, (-600.0, 600.0), 0.0, 0.0, true, "Product of cosines over a bowl"),
        entry("schwefel", schwefel, (-500.0, 500.0), 0.0, 420.9687, true, "Deceptive far-apart minima"),
    ] {
        metadata.insert(meta.name.clone(), meta);
    }

    metadata.insert(
        "booth".to_string(),
        FunctionMetadata {
            name: "booth".to_string(),
            function: booth,
            bounds: vec![(-10.0, 10.0); 2],
            global_minima: vec![(vec![1.0, 3.0], 0.0)],
            description: "2D plate-shaped function".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );
    metadata.insert(
        "himmelblau".to_string(),
        FunctionMetadata {
            name: "himmelblau".to_string(),
            function: himmelblau,
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![
                (vec![3.0, 2.0], 0.0),
                (vec![-2.805118, 3.131312], 0.0),
                (vec![-3.779310, -3.283186], 0.0),
                (vec![3.584428, -1.848126], 0.0),
            ],
            description: "2D function with four identical minima".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata
}

/// Look up a test function by name
pub fn get_function(function_name: &str) -> Option<TestFunction> {
    get_function_metadata().get(function_name).map(|meta| meta.function)
}

/// Helper function to get bounds for a specific function from metadata
/// Returns None if function is not found in metadata
pub fn get_function_bounds(function_name: &str) -> Option<Vec<(f64, f64)>> {
    let metadata = get_function_metadata();
    metadata.get(function_name).map(|meta| meta.bounds.clone())
}

/// Bounds for `dim` dimensions, repeating a single per-dimension range as needed.
/// Returns `dim` copies of `default_bounds` if the function is not found.
pub fn get_function_bounds_vec(
    function_name: &str,
    dim: usize,
    default_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    match get_function_bounds(function_name) {
        Some(bounds) if bounds.len() == 1 => vec![bounds[0]; dim],
        Some(bounds) if bounds.len() == dim => bounds,
        _ => vec![default_bounds; dim],
    }
}
