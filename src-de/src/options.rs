//! Keyword-style configuration.
//!
//! Callers that hold options as a name/value map (for example a plugin that
//! forwards user settings untouched) build a [`DEConfig`] through
//! [`DEConfig::from_options`]. Option names follow SciPy's
//! `differential_evolution` keyword arguments.

use ndarray::{Array1, Array2};
use serde_json::{Map, Value};

use crate::{DEConfig, DEError, Init, Mutation, ParallelConfig, PolishConfig, Result};

const INIT_EXPECTED: &str = "\"latinhypercube\", \"random\" or a rectangular array of points";

fn invalid(key: &str, expected: &'static str) -> DEError {
    DEError::InvalidOption { key: key.to_string(), expected }
}

fn as_f64(key: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| invalid(key, "a number"))
}

fn as_usize(key: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .map(|v| v as usize)
        .ok_or_else(|| invalid(key, "a non-negative integer"))
}

fn as_vector(key: &str, value: &Value) -> Result<Array1<f64>> {
    let items = value.as_array().ok_or_else(|| invalid(key, "an array of numbers"))?;
    items
        .iter()
        .map(|v| v.as_f64().ok_or_else(|| invalid(key, "an array of numbers")))
        .collect()
}

fn as_matrix(key: &str, rows: &[Value]) -> Result<Array2<f64>> {
    let rows: Vec<Array1<f64>> = rows
        .iter()
        .map(|r| as_vector(key, r))
        .collect::<Result<_>>()
        .map_err(|_| invalid(key, INIT_EXPECTED))?;
    let ncols = rows.first().map_or(0, |r| r.len());
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(invalid(key, INIT_EXPECTED));
    }
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Array2::from_shape_vec((rows.len(), ncols), flat).map_err(|_| invalid(key, INIT_EXPECTED))
}

impl DEConfig {
    /// Build a configuration from defaults plus every entry of `options`.
    pub fn from_options(options: &Map<String, Value>) -> Result<Self> {
        let mut cfg = DEConfig::default();
        for (key, value) in options {
            cfg.apply_option(key, value)?;
        }
        Ok(cfg)
    }

    /// Apply one named option on top of the current configuration.
    pub fn apply_option(&mut self, key: &str, value: &Value) -> Result<()> {
        match key {
            "strategy" => {
                self.strategy = value
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| invalid(key, "a strategy name such as \"best1bin\""))?;
            }
            "maxiter" => self.maxiter = as_usize(key, value)?,
            "popsize" => self.popsize = as_usize(key, value)?,
            "tol" => self.tol = as_f64(key, value)?,
            "atol" => self.atol = as_f64(key, value)?,
            "mutation" => {
                self.mutation = match value {
                    Value::Number(_) => Mutation::Factor(as_f64(key, value)?),
                    Value::Array(pair) if pair.len() == 2 => {
                        let range = as_vector(key, value)?;
                        Mutation::Range { min: range[0], max: range[1] }
                    }
                    _ => return Err(invalid(key, "a number or a [min, max] pair")),
                };
            }
            "recombination" => self.recombination = as_f64(key, value)?,
            "seed" => {
                self.seed = match value {
                    Value::Null => None,
                    _ => Some(value.as_u64().ok_or_else(|| invalid(key, "a non-negative integer"))?),
                };
            }
            "disp" => self.disp = value.as_bool().ok_or_else(|| invalid(key, "a boolean"))?,
            "polish" => {
                let enabled = value.as_bool().ok_or_else(|| invalid(key, "a boolean"))?;
                self.polish = Some(PolishConfig { enabled, ..PolishConfig::default() });
            }
            "init" => {
                self.init = match value {
                    Value::String(s) if s.eq_ignore_ascii_case("latinhypercube") => {
                        Init::LatinHypercube
                    }
                    Value::String(s) if s.eq_ignore_ascii_case("random") => Init::Random,
                    Value::Array(rows) => Init::Population(as_matrix(key, rows)?),
                    _ => return Err(invalid(key, INIT_EXPECTED)),
                };
            }
            "x0" => {
                self.x0 = match value {
                    Value::Null => None,
                    _ => Some(as_vector(key, value)?),
                };
            }
            "integrality" => {
                let mask = value
                    .as_array()
                    .and_then(|items| items.iter().map(Value::as_bool).collect::<Option<Vec<_>>>())
                    .ok_or_else(|| invalid(key, "an array of booleans"))?;
                self.integrality = Some(mask);
            }
            "updating" => {
                if value.as_str() != Some("deferred") {
                    return Err(invalid(key, "\"deferred\""));
                }
            }
            "workers" => {
                self.parallel = value
                    .as_i64()
                    .and_then(ParallelConfig::from_workers)
                    .ok_or_else(|| invalid(key, "1, -1 or an integer greater than 1"))?;
            }
            _ => return Err(DEError::UnknownOption { key: key.to_string() }),
        }
        Ok(())
    }
}
