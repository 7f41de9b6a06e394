//! Population of candidate solutions for a [`ProblemHandle`].

use std::cmp::Ordering;
use std::fmt;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PopdeError, Result};
use crate::problem::ProblemHandle;

/// Order two fitness vectors of a problem with `nobj` objectives (only the
/// first is used), `nec` equality and `nic` inequality constraints.
///
/// Feasible beats infeasible. Among infeasible vectors the one violating
/// fewer constraints wins, then the one with the smaller violation norm.
/// Among feasible vectors the smaller objective wins; NaN ranks worst.
pub fn compare_fitness(a: &Array1<f64>, b: &Array1<f64>, nobj: usize, nec: usize) -> Ordering {
    let (va, na) = violation(a, nobj, nec);
    let (vb, nb) = violation(b, nobj, nec);
    match (va, vb) {
        (0, 0) => compare_objective(a[0], b[0]),
        (0, _) => Ordering::Less,
        (_, 0) => Ordering::Greater,
        _ => va.cmp(&vb).then_with(|| compare_objective(na, nb)),
    }
}

fn compare_objective(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Count of violated constraints and the L2 norm of the violations.
fn violation(f: &Array1<f64>, nobj: usize, nec: usize) -> (usize, f64) {
    let mut count = 0usize;
    let mut sq = 0.0;
    for (k, &c) in f.iter().enumerate().skip(nobj) {
        let v = if k < nobj + nec { c.abs() } else { c.max(0.0) };
        // NaN constraint values count as violated
        if v > 0.0 || v.is_nan() {
            count += 1;
            sq += v * v;
        }
    }
    (count, sq.sqrt())
}

/// Decision vectors, their fitness and ids, plus the best individual ever seen.
#[derive(Clone)]
pub struct Population {
    problem: ProblemHandle,
    x: Vec<Array1<f64>>,
    f: Vec<Array1<f64>>,
    ids: Vec<u64>,
    champion: Option<(Array1<f64>, Array1<f64>)>,
    rng: StdRng,
}

impl Population {
    /// Create `size` individuals drawn uniformly within the problem bounds.
    pub fn new(problem: ProblemHandle, size: usize, seed: u64) -> Result<Self> {
        let mut pop = Self {
            problem,
            x: Vec::with_capacity(size),
            f: Vec::with_capacity(size),
            ids: Vec::with_capacity(size),
            champion: None,
            rng: StdRng::seed_from_u64(seed),
        };
        for _ in 0..size {
            let x = pop.random_decision_vector();
            pop.push_back(x)?;
        }
        Ok(pop)
    }

    /// Uniform random point within the problem bounds.
    pub fn random_decision_vector(&mut self) -> Array1<f64> {
        let (lower, upper) = self.problem.bounds();
        let rng = &mut self.rng;
        lower
            .iter()
            .zip(upper.iter())
            .map(|(&lo, &hi)| if lo < hi { rng.random_range(lo..hi) } else { lo })
            .collect()
    }

    /// Evaluate `x` and append it.
    pub fn push_back(&mut self, x: Array1<f64>) -> Result<()> {
        let f = self.problem.fitness(&x)?;
        self.push_back_xf(x, f)
    }

    /// Append `x` with an already known fitness `f`.
    pub fn push_back_xf(&mut self, x: Array1<f64>, f: Array1<f64>) -> Result<()> {
        self.check_lengths(&x, &f)?;
        self.update_champion(&x, &f);
        let id = self.rng.random();
        self.x.push(x);
        self.f.push(f);
        self.ids.push(id);
        Ok(())
    }

    /// Replace individual `i`, keeping its id.
    pub fn set_xf(&mut self, i: usize, x: Array1<f64>, f: Array1<f64>) -> Result<()> {
        if i >= self.len() {
            return Err(PopdeError::IndexOutOfBounds { index: i, len: self.len() });
        }
        self.check_lengths(&x, &f)?;
        self.update_champion(&x, &f);
        self.x[i] = x;
        self.f[i] = f;
        Ok(())
    }

    /// Evaluate `x` and store it at index `i`.
    pub fn set_x(&mut self, i: usize, x: Array1<f64>) -> Result<()> {
        if i >= self.len() {
            return Err(PopdeError::IndexOutOfBounds { index: i, len: self.len() });
        }
        let f = self.problem.fitness(&x)?;
        self.set_xf(i, x, f)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn problem(&self) -> &ProblemHandle {
        &self.problem
    }

    /// Decision vectors as a `len x nx` matrix.
    pub fn get_x(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), self.problem.nx()), |(i, j)| self.x[i][j])
    }

    /// Fitness vectors as a `len x nf` matrix.
    pub fn get_f(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), self.problem.nf()), |(i, j)| self.f[i][j])
    }

    pub fn get_ids(&self) -> &[u64] {
        &self.ids
    }

    /// Decision and fitness vector of individual `i`.
    pub fn individual(&self, i: usize) -> Option<(&Array1<f64>, &Array1<f64>)> {
        Some((self.x.get(i)?, self.f.get(i)?))
    }

    /// Index of the best individual; the first one wins ties.
    pub fn best_idx(&self) -> Result<usize> {
        self.rank_by(Ordering::Less)
    }

    /// Index of the worst individual; the first one wins ties.
    pub fn worst_idx(&self) -> Result<usize> {
        self.rank_by(Ordering::Greater)
    }

    pub fn champion_x(&self) -> Option<&Array1<f64>> {
        self.champion.as_ref().map(|(x, _)| x)
    }

    pub fn champion_f(&self) -> Option<&Array1<f64>> {
        self.champion.as_ref().map(|(_, f)| f)
    }

    fn rank_by(&self, wanted: Ordering) -> Result<usize> {
        if self.is_empty() {
            return Err(PopdeError::EmptyPopulation);
        }
        if self.problem.nobj() > 1 {
            return Err(PopdeError::MultiObjectiveRanking);
        }
        let mut idx = 0;
        for i in 1..self.len() {
            if self.compare(&self.f[i], &self.f[idx]) == wanted {
                idx = i;
            }
        }
        Ok(idx)
    }

    fn compare(&self, a: &Array1<f64>, b: &Array1<f64>) -> Ordering {
        compare_fitness(a, b, self.problem.nobj(), self.problem.nec())
    }

    fn check_lengths(&self, x: &Array1<f64>, f: &Array1<f64>) -> Result<()> {
        if x.len() != self.problem.nx() {
            return Err(PopdeError::DimensionMismatch {
                what: "decision vector",
                expected: self.problem.nx(),
                got: x.len(),
            });
        }
        if f.len() != self.problem.nf() {
            return Err(PopdeError::DimensionMismatch {
                what: "fitness vector",
                expected: self.problem.nf(),
                got: f.len(),
            });
        }
        Ok(())
    }

    fn update_champion(&mut self, x: &Array1<f64>, f: &Array1<f64>) {
        if self.problem.nobj() > 1 {
            return;
        }
        let improved = match &self.champion {
            None => true,
            Some((_, cf)) => self.compare(f, cf) == Ordering::Less,
        };
        if improved {
            self.champion = Some((x.clone(), f.clone()));
        }
    }
}

impl fmt::Debug for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Population")
            .field("problem", &self.problem.name())
            .field("len", &self.len())
            .field("champion_f", &self.champion_f())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.problem)?;
        writeln!(f)?;
        writeln!(f, "Population size: {}", self.len())?;
        if let (Some(cx), Some(cf)) = (self.champion_x(), self.champion_f()) {
            writeln!(f, "Champion decision vector: {}", cx)?;
            writeln!(f, "Champion fitness: {}", cf)?;
        }
        for (i, ((x, fit), id)) in self.x.iter().zip(&self.f).zip(&self.ids).enumerate() {
            writeln!(f, "#{}: id {}  x {}  f {}", i, id, x, fit)?;
        }
        Ok(())
    }
}
