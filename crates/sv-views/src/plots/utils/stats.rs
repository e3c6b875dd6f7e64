//! Correlation math for the heatmap view

/// Pearson correlation of two equally long samples.
///
/// Pairs with a non-finite member are skipped so null rows do not poison
/// the estimate. Zero-variance inputs yield 0.0.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();

    if pairs.is_empty() {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        0.0
    } else {
        cov / (var_x.sqrt() * var_y.sqrt())
    }
}

/// Pairwise Pearson correlation matrix over the given columns.
///
/// The result is square with dimension `columns.len()`, symmetric, with
/// 1.0 on the diagonal.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in 0..i {
            let r = pearson(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    matrix
}

/// Observed minimum and maximum over all matrix entries.
pub fn observed_bounds(matrix: &[Vec<f64>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in matrix {
        for &value in row {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

/// Color-scale bounds for the heatmap: the fixed correlation range, or the
/// observed extrema when the scale toggle is on.
pub fn color_bounds(matrix: &[Vec<f64>], scale_to_observed: bool) -> (f64, f64) {
    if scale_to_observed {
        observed_bounds(matrix)
    } else {
        (-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 4.0, 6.0, 8.0, 10.0],
            vec![5.0, 4.0, 3.0, 2.0, 1.0],
        ]
    }

    #[test]
    fn test_matrix_shape_and_diagonal() {
        let matrix = correlation_matrix(&sample_columns());
        assert_eq!(matrix.len(), 3);
        for (i, row) in matrix.iter().enumerate() {
            assert_eq!(row.len(), 3);
            assert!((row[i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_matrix_symmetry() {
        let matrix = correlation_matrix(&sample_columns());
        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_perfect_correlations() {
        let matrix = correlation_matrix(&sample_columns());
        assert!((matrix[0][1] - 1.0).abs() < 1e-12);
        assert!((matrix[0][2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_zero() {
        let flat = vec![3.0; 5];
        let rising = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(pearson(&flat, &rising), 0.0);
    }

    #[test]
    fn test_non_finite_pairs_skipped() {
        let x = vec![1.0, f64::NAN, 3.0, 4.0];
        let y = vec![2.0, 100.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_observed_bounds_cover_all_entries() {
        let matrix = correlation_matrix(&sample_columns());
        let (vmin, vmax) = color_bounds(&matrix, true);
        for row in &matrix {
            for &value in row {
                assert!(value >= vmin && value <= vmax);
            }
        }
        assert!((vmin + 1.0).abs() < 1e-12);
        assert!((vmax - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_bounds() {
        let matrix = correlation_matrix(&sample_columns());
        assert_eq!(color_bounds(&matrix, false), (-1.0, 1.0));
    }
}
