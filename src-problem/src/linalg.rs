use ndarray::{Array2, ArrayView2};

use crate::error::ProblemError;

/// Absolute tolerance used when checking `det(R) == 1` and `R^T R == I`.
///
/// Rotation matrices built from floating-point data (Gram-Schmidt, cos/sin
/// pairs) are only orthogonal up to rounding, so an exact comparison would
/// reject every rotation except permutations.
pub const ROTATION_TOLERANCE: f64 = 1e-10;

/// Determinant via LU decomposition with partial pivoting
pub fn determinant(matrix: &ArrayView2<f64>) -> f64 {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());
    if n == 0 {
        return 1.0;
    }

    let mut lu = matrix.to_owned();
    let mut det = 1.0;

    for k in 0..n {
        // pivot
        let mut pivot_row = k;
        let mut pivot_abs = lu[[k, k]].abs();
        for i in (k + 1)..n {
            if lu[[i, k]].abs() > pivot_abs {
                pivot_abs = lu[[i, k]].abs();
                pivot_row = i;
            }
        }
        if pivot_abs == 0.0 {
            return 0.0;
        }
        if pivot_row != k {
            for j in 0..n {
                lu.swap([k, j], [pivot_row, j]);
            }
            det = -det;
        }

        let pivot = lu[[k, k]];
        det *= pivot;
        for i in (k + 1)..n {
            let factor = lu[[i, k]] / pivot;
            for j in (k + 1)..n {
                lu[[i, j]] -= factor * lu[[k, j]];
            }
        }
    }

    det
}

/// Checks that `matrix` is a proper rotation: square, `det == 1` and `R^T R == I`.
///
/// Returns a description of the first violated property.
pub fn check_rotation_matrix(matrix: &ArrayView2<f64>) -> Result<(), String> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(format!("The ({}, {})-matrix must be square.", rows, cols));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err("The entries of a rotation matrix must be finite.".to_string());
    }

    let det = determinant(matrix);
    if (det - 1.0).abs() > ROTATION_TOLERANCE {
        return Err(format!("The determinant ({}) of a proper rotation matrix must be 1.", det));
    }

    let gram = matrix.t().dot(matrix);
    let identity = Array2::<f64>::eye(rows);
    let deviation = (&gram - &identity).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if deviation > ROTATION_TOLERANCE {
        return Err(format!(
            "The matrix must be orthogonal (max |R^T R - I| = {:e}).",
            deviation
        ));
    }

    Ok(())
}

/// Checks that `matrix` is a proper `d x d` rotation, for use by setters.
pub(crate) fn ensure_rotation(number_of_dimensions: usize, matrix: &Array2<f64>) -> Result<(), ProblemError> {
    let (rows, cols) = matrix.dim();
    if rows != cols || rows != number_of_dimensions {
        return Err(ProblemError::InvalidRotation(format!(
            "The ({}, {})-matrix must be square and its number of rows/columns must match the dimension of the problem ({}).",
            rows, cols, number_of_dimensions
        )));
    }
    check_rotation_matrix(&matrix.view()).map_err(ProblemError::InvalidRotation)
}
