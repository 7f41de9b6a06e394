//! Optimisation problems and the validated handle the rest of the crate works with.
//!
//! A [`Problem`] is what users implement: bounds, a fitness function and a few
//! capability queries. [`ProblemHandle`] wraps one behind an `Arc`, checks its
//! definition once, caches the bounds and counts fitness evaluations.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array1;

use crate::error::{PopdeError, Result};

/// A single or multi-objective, possibly constrained, box-bounded problem.
///
/// The fitness vector is laid out as
/// `[objectives.., equality constraints.., inequality constraints..]`.
/// Equality constraints are satisfied at zero, inequality constraints when
/// less than or equal to zero.
pub trait Problem: Send + Sync {
    /// Evaluate the fitness vector at `x`.
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64>;

    /// Lower and upper box bounds.
    fn bounds(&self) -> (Array1<f64>, Array1<f64>);

    /// Number of objectives.
    fn nobj(&self) -> usize {
        1
    }

    /// Number of equality constraints.
    fn nec(&self) -> usize {
        0
    }

    /// Number of inequality constraints.
    fn nic(&self) -> usize {
        0
    }

    /// Whether repeated evaluations of the same point may differ.
    fn is_stochastic(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    fn extra_info(&self) -> String {
        String::new()
    }
}

/// Shared, validated view of a [`Problem`].
pub struct ProblemHandle {
    inner: Arc<dyn Problem>,
    lower: Array1<f64>,
    upper: Array1<f64>,
    nobj: usize,
    nec: usize,
    nic: usize,
    fevals: AtomicU64,
}

impl ProblemHandle {
    /// Wrap `problem`, rejecting malformed bounds or a zero objective count.
    pub fn new<P: Problem + 'static>(problem: P) -> Result<Self> {
        Self::from_arc(Arc::new(problem))
    }

    /// Same as [`ProblemHandle::new`] for an already shared problem.
    pub fn from_arc(inner: Arc<dyn Problem>) -> Result<Self> {
        let (lower, upper) = inner.bounds();
        if lower.len() != upper.len() {
            return Err(PopdeError::BoundsMismatch {
                lower_len: lower.len(),
                upper_len: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(PopdeError::EmptyBounds(inner.name()));
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(PopdeError::InvalidBounds { index, lower: lo, upper: hi });
            }
        }
        let nobj = inner.nobj();
        if nobj == 0 {
            return Err(PopdeError::NoObjectives(inner.name()));
        }
        let (nec, nic) = (inner.nec(), inner.nic());
        Ok(Self { inner, lower, upper, nobj, nec, nic, fevals: AtomicU64::new(0) })
    }

    /// Evaluate the fitness at `x`, checking both vector lengths.
    pub fn fitness(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.nx() {
            return Err(PopdeError::DimensionMismatch {
                what: "decision vector",
                expected: self.nx(),
                got: x.len(),
            });
        }
        let f = self.inner.fitness(x);
        self.fevals.fetch_add(1, Ordering::Relaxed);
        if f.len() != self.nf() {
            return Err(PopdeError::DimensionMismatch {
                what: "fitness vector",
                expected: self.nf(),
                got: f.len(),
            });
        }
        Ok(f)
    }

    pub fn bounds(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.lower, &self.upper)
    }

    /// Dimension of the decision vector.
    pub fn nx(&self) -> usize {
        self.lower.len()
    }

    pub fn nobj(&self) -> usize {
        self.nobj
    }

    pub fn nec(&self) -> usize {
        self.nec
    }

    pub fn nic(&self) -> usize {
        self.nic
    }

    /// Total number of constraints.
    pub fn nc(&self) -> usize {
        self.nec + self.nic
    }

    /// Length of the fitness vector.
    pub fn nf(&self) -> usize {
        self.nobj + self.nc()
    }

    pub fn is_stochastic(&self) -> bool {
        self.inner.is_stochastic()
    }

    pub fn name(&self) -> String {
        self.inner.name()
    }

    pub fn extra_info(&self) -> String {
        self.inner.extra_info()
    }

    /// Number of fitness evaluations made through this handle.
    pub fn fevals(&self) -> u64 {
        self.fevals.load(Ordering::Relaxed)
    }
}

impl Clone for ProblemHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            nobj: self.nobj,
            nec: self.nec,
            nic: self.nic,
            fevals: AtomicU64::new(self.fevals()),
        }
    }
}

impl fmt::Debug for ProblemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemHandle")
            .field("name", &self.name())
            .field("nx", &self.nx())
            .field("nobj", &self.nobj)
            .field("nec", &self.nec)
            .field("nic", &self.nic)
            .field("fevals", &self.fevals())
            .finish()
    }
}

impl fmt::Display for ProblemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problem name: {}", self.name())?;
        writeln!(f, "\tDimension: {}", self.nx())?;
        writeln!(f, "\tObjectives: {}", self.nobj)?;
        writeln!(f, "\tConstraints: {} equality, {} inequality", self.nec, self.nic)?;
        writeln!(f, "\tLower bounds: {}", self.lower)?;
        writeln!(f, "\tUpper bounds: {}", self.upper)?;
        writeln!(f, "\tStochastic: {}", self.is_stochastic())?;
        write!(f, "\tFitness evaluations: {}", self.fevals())?;
        let extra = self.extra_info();
        if !extra.is_empty() {
            write!(f, "\n\nExtra info:\n{}", extra)?;
        }
        Ok(())
    }
}
