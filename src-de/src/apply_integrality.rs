use ndarray::Array1;

/// Round masked variables to the nearest integer that stays inside the bounds.
pub(crate) fn apply_integrality(
    x: &mut Array1<f64>,
    mask: &[bool],
    lower: &Array1<f64>,
    upper: &Array1<f64>,
) {
    for (i, _) in mask.iter().enumerate().filter(|(_, integer)| **integer) {
        x[i] = x[i].round().clamp(lower[i].ceil(), upper[i].floor().max(lower[i].ceil()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_only_masked() {
        let mut x = Array1::from(vec![1.4, 2.6, -0.2]);
        let lower = Array1::from(vec![0.0, 0.0, -0.5]);
        let upper = Array1::from(vec![3.0, 3.0, 0.5]);
        apply_integrality(&mut x, &[true, false, true], &lower, &upper);
        assert_eq!(x.to_vec(), vec![1.0, 2.6, 0.0]);
    }

    #[test]
    fn test_rounding_stays_in_bounds() {
        let mut x = Array1::from(vec![2.9]);
        apply_integrality(&mut x, &[true], &Array1::from(vec![0.2]), &Array1::from(vec![2.9]));
        assert_eq!(x[0], 2.0);
    }
}
