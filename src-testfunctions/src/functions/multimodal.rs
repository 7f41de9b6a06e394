//! Multimodal test functions
//!
//! These functions have multiple local minima and are used to test the global
//! search capabilities and exploration of optimization algorithms.

use ndarray::Array1;
use std::f64::consts::PI;

/// Rastrigin function - regular grid of local minima
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|&xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function - nearly flat outer region, deep central hole
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
pub fn ackley(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum_sq = x.iter().map(|&xi| xi * xi).sum::<f64>() / n;
    let sum_cos = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * sum_sq.sqrt()).exp() - sum_cos.exp() + 20.0 + std::f64::consts::E
}

/// Griewank function
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-600, 600]
pub fn griewank(x: &Array1<f64>) -> f64 {
    let sum = x.iter().map(|&xi| xi * xi).sum::<f64>() / 4000.0;
    let prod = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product::<f64>();
    sum - prod + 1.0
}

/// Schwefel function - deceptive, the best local minima are far apart
/// Global minimum: f(x) ~ 0 at x = (420.9687, ..., 420.9687)
/// Bounds: x_i in [-500, 500]
pub fn schwefel(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    418.9829 * n - x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Himmelblau function (2D only) - four identical minima
/// Global minimum: f(x) = 0 at (3, 2), (-2.805118, 3.131312),
/// (-3.779310, -3.283186), (3.584428, -1.848126)
/// Bounds: x_i in [-5, 5]
pub fn himmelblau(x: &Array1<f64>) -> f64 {
    (x[0] * x[0] + x[1] - 11.0).powi(2) + (x[0] + x[1] * x[1] - 7.0).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multimodal_minima() {
        let zero = Array1::zeros(3);
        assert!(rastrigin(&zero).abs() < 1e-12);
        assert!(ackley(&zero).abs() < 1e-12);
        assert!(griewank(&zero).abs() < 1e-12);
        assert!(himmelblau(&Array1::from(vec![3.0, 2.0])).abs() < 1e-12);
    }

    #[test]
    fn test_schwefel_near_optimum() {
        let x = Array1::from(vec![420.9687; 2]);
        assert!(schwefel(&x).abs() < 1e-3, "schwefel = {}", schwefel(&x));
    }

    #[test]
    fn test_rastrigin_local_minimum() {
        // integer points are local minima with value sum(x_i^2)
        let x = Array1::from(vec![1.0, 0.0]);
        assert!((rastrigin(&x) - 1.0).abs() < 1e-12);
    }
}
