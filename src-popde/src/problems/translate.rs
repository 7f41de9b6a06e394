use ndarray::Array1;

use crate::error::{PopdeError, Result};
use crate::problem::Problem;

/// Meta-problem moving another problem by a constant vector.
///
/// If the inner problem has its optimum at `x*`, the translated one has it
/// at `x* + translation`. Bounds move the same way.
pub struct Translate {
    inner: Box<dyn Problem>,
    translation: Array1<f64>,
}

impl Translate {
    /// Fails when `translation` does not match the inner problem's dimension.
    pub fn new<P: Problem + 'static>(inner: P, translation: Array1<f64>) -> Result<Self> {
        let (lower, _) = inner.bounds();
        if lower.len() != translation.len() {
            return Err(PopdeError::TranslationMismatch {
                expected: lower.len(),
                got: translation.len(),
            });
        }
        Ok(Self { inner: Box::new(inner), translation })
    }

    pub fn translation(&self) -> &Array1<f64> {
        &self.translation
    }
}

impl Problem for Translate {
    fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
        self.inner.fitness(&(x - &self.translation))
    }

    fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
        let (lower, upper) = self.inner.bounds();
        (lower + &self.translation, upper + &self.translation)
    }

    fn nobj(&self) -> usize {
        self.inner.nobj()
    }

    fn nec(&self) -> usize {
        self.inner.nec()
    }

    fn nic(&self) -> usize {
        self.inner.nic()
    }

    fn is_stochastic(&self) -> bool {
        self.inner.is_stochastic()
    }

    fn name(&self) -> String {
        format!("{} [translated]", self.inner.name())
    }

    fn extra_info(&self) -> String {
        format!("{}\n\tTranslation Vector: {}", self.inner.extra_info(), self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::Benchmark;
    use ndarray::array;

    #[test]
    fn test_shifts_bounds_and_optimum() {
        let shifted = Translate::new(Benchmark::new("sphere", 2).unwrap(), array![1.0, -2.0])
            .unwrap();
        let (lower, upper) = shifted.bounds();
        let close = |a: &Array1<f64>, b: Array1<f64>| (a - &b).iter().all(|d| d.abs() < 1e-12);
        assert!(close(&lower, array![-4.12, -7.12]));
        assert!(close(&upper, array![6.12, 3.12]));
        assert_eq!(shifted.fitness(&array![1.0, -2.0]), array![0.0]);
        assert_eq!(shifted.fitness(&array![0.0, 0.0]), array![5.0]);
    }

    #[test]
    fn test_name_and_info() {
        let shifted = Translate::new(Benchmark::new("booth", 2).unwrap(), array![0.5, 0.5])
            .unwrap();
        assert_eq!(shifted.name(), "booth [translated]");
        assert!(shifted.extra_info().contains("\n\tTranslation Vector: [0.5, 0.5]"));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Translate::new(Benchmark::new("sphere", 3).unwrap(), array![1.0]).err();
        assert!(matches!(err, Some(PopdeError::TranslationMismatch { expected: 3, got: 1 })));
    }
}
