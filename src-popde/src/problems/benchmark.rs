use ndarray::Array1;
use popde_testfunctions::{TestFunction, get_function_metadata};

use crate::error::{PopdeError, Result};
use crate::problem::Problem;

/// A named test function on its usual search box.
#[derive(Debug, Clone)]
pub struct Benchmark {
    name: String,
    function: TestFunction,
    lower: Array1<f64>,
    upper: Array1<f64>,
    description: String,
    minimum: Option<f64>,
}

impl Benchmark {
    /// Look up `name` among the test functions and build it in `dim` dimensions.
    pub fn new(name: &str, dim: usize) -> Result<Self> {
        let metadata = get_function_metadata();
        let meta = metadata.get(name).ok_or_else(|| PopdeError::UnknownFunction(name.to_string()))?;
        if let Some(supported) = meta.fixed_dimension() {
            if supported != dim {
                return Err(PopdeError::UnsupportedDimension {
                    name: name.to_string(),
                    supported,
                    requested: dim,
                });
            }
        }
        let bounds = match meta.bounds.as_slice() {
            [range] => vec![*range; dim],
            all => all.to_vec(),
        };
        Ok(Self {
            name: meta.name.clone(),
            function: meta.function,
            lower: bounds.iter().map(|&(lo, _)| lo).collect(),
            upper: bounds.iter().map(|&(_, hi)| hi).collect(),
            description: meta.description.clone(),
            minimum: meta.global_minima.first().map(|&(_, f)| f),
        })
    }

    /// Names of every available test function, sorted.
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = get_function_metadata().into_keys().collect();
        names.sort();
        names
    }

    /// Known global minimum value, if any.
    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }
}

impl Problem for Benchmark {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        Array1::from_elem(1, (self.function)(x))
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        (self.lower.clone(), self.upper.clone())
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn extra_info(&self) -> String {
        match self.minimum {
            Some(f) => format!("\t{}\n\tGlobal minimum: {}", self.description, f),
            None => format!("\t{}", self.description),
        }
    }
}
