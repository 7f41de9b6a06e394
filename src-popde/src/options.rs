//! Solver options held by the DE adapter.
//!
//! Options are kept as a JSON object and forwarded to the solver untouched,
//! so any keyword the solver understands can be set. Keys the adapter fills
//! in itself are rejected up front.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PopdeError, Result};

/// Option names owned by the adapter, with the reason each is refused.
pub const RESERVED_KEYS: [(&str, &str); 5] = [
    ("func", "the objective function will be provided by the problem"),
    ("bounds", "the problem bounds will be provided by the problem"),
    ("args", "the objective function will be provided by the problem"),
    ("popsize", "the population will be provided by the caller of evolve"),
    ("init", "the population will be provided by the caller of evolve"),
];

/// Name/value options forwarded to the DE solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolverOptions(Map<String, Value>);

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object such as `{"maxiter": 100, "strategy": "rand1bin"}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON options file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| PopdeError::OptionsFile { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// Set `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge `other` on top of `self`; keys of `other` win.
    pub fn merge(&mut self, other: SolverOptions) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First reserved key present, in [`RESERVED_KEYS`] order.
    pub(crate) fn check_reserved(&self) -> Result<()> {
        match RESERVED_KEYS.iter().find(|(key, _)| self.0.contains_key(*key)) {
            Some(&(key, reason)) => {
                Err(PopdeError::InvalidArgument { key: key.to_string(), reason })
            }
            None => Ok(()),
        }
    }
}

impl From<Map<String, Value>> for SolverOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("\tOptions: none");
        }
        f.write_str("\tOptions:")?;
        for (key, value) in &self.0 {
            write!(f, "\n\t\t{}: {}", key, value)?;
        }
        Ok(())
    }
}
