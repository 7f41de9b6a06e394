use crate::{DifferentialEvolution, PolishConfig};
use ndarray::Array1;

// ------------------------------ Internal helpers ------------------------------

impl<'a, F> DifferentialEvolution<'a, F>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    /// Bounded coordinate search around `x0`. Only strict improvements are
    /// kept, so the returned value never exceeds `f0`.
    pub(crate) fn polish(
        &self,
        x0: &Array1<f64>,
        f0: f64,
        cfg: &PolishConfig,
    ) -> (Array1<f64>, f64, usize) {
        let n = x0.len();
        let mut x = x0.clone();
        let mut best_f = f0;
        let mut nfev = 0;
        let max_eval = cfg.maxeval.min(200 * n);
        let min_step = 1e-8;
        let mut step = 0.1;

        while nfev < max_eval && step > min_step {
            let mut improved = false;
            for i in 0..n {
                let original = x[i];
                let dim_step = step * (self.upper[i] - self.lower[i]).max(1.0);
                for delta in [dim_step, -dim_step] {
                    if nfev >= max_eval {
                        break;
                    }
                    x[i] = (original + delta).clamp(self.lower[i], self.upper[i]);
                    let f = (self.func)(&x);
                    nfev += 1;
                    if f < best_f {
                        best_f = f;
                        improved = true;
                        break;
                    }
                    x[i] = original;
                }
            }
            if !improved {
                step *= 0.5;
            }
        }

        (x, best_f, nfev)
    }
}
