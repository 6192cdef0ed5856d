// Savitzky-Golay smoothing
// Least-squares polynomial smoothing of the velocity channel with
// polynomial edge handling

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmoothError {
    #[error("Cannot smooth an empty series")]
    EmptyInput,

    #[error("Smoothing window {window} is invalid for order {order} over {len} samples")]
    InvalidWindow {
        /// Effective window after even values are rounded up
        window: usize,
        order: usize,
        len: usize,
    },
}

/// Configuration for Savitzky-Golay smoothing
#[derive(Debug, Clone)]
pub struct SmootherConfig {
    /// Window length in samples
    /// Even values are rounded up to the next odd value so a center exists
    pub window: usize,

    /// Polynomial order of the local fit
    /// Must be strictly less than the effective window
    pub order: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        SmootherConfig {
            window: 10,
            order: 2,
        }
    }
}

/// Smooth a velocity series with a Savitzky-Golay filter
///
/// Algorithm:
/// 1. Round an even window up to the next odd value
/// 2. Fit a least-squares polynomial of the configured order over each
///    centered window and keep its value at the center sample
/// 3. At the edges, fit one polynomial to the first (last) full window and
///    evaluate it at each leading (trailing) offset
///
/// Samples are treated as uniformly spaced; the time column is not
/// consulted. Output length always equals input length.
pub fn smooth(velocity: &[f64], config: &SmootherConfig) -> Result<Vec<f64>, SmoothError> {
    if velocity.is_empty() {
        return Err(SmoothError::EmptyInput);
    }

    let window = effective_window(config.window);
    if window != config.window {
        log::debug!(
            "Rounded even smoothing window {} up to {}",
            config.window,
            window
        );
    }

    let len = velocity.len();
    if window > len || window <= config.order {
        return Err(SmoothError::InvalidWindow {
            window,
            order: config.order,
            len,
        });
    }

    // One weight row per in-window evaluation offset; row `half` is the
    // centered fit used for interior samples
    let rows = match weight_rows(window, config.order) {
        Some(rows) => rows,
        None => {
            return Err(SmoothError::InvalidWindow {
                window,
                order: config.order,
                len,
            });
        }
    };

    let half = window / 2;
    let mut smoothed = Vec::with_capacity(len);

    for i in 0..len {
        let (window_start, row) = if i < half {
            // Leading edge: evaluate the first-window fit at offset i
            (0, &rows[i])
        } else if i + half >= len {
            // Trailing edge: evaluate the last-window fit at its offset
            (len - window, &rows[i + window - len])
        } else {
            (i - half, &rows[half])
        };

        let mut acc = 0.0;
        for (j, weight) in row.iter().enumerate() {
            acc += weight * velocity[window_start + j];
        }
        smoothed.push(acc);
    }

    Ok(smoothed)
}

/// Round an even window up to the next odd value
/// This is the window the filter actually applies
pub fn effective_window(window: usize) -> usize {
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}

/// Compute the filter weights for every evaluation offset in the window
/// Returns None when the normal equations are numerically singular
fn weight_rows(window: usize, order: usize) -> Option<Vec<Vec<f64>>> {
    (0..window)
        .map(|offset| fit_weights(window, order, offset))
        .collect()
}

/// Least-squares weights for one evaluation offset
///
/// Solving the normal equations of the polynomial fit, centered on the
/// evaluation offset, gives coefficients c such that the fitted value is
/// sum_j (sum_k c[k] * (j - offset)^k) * y[j].
fn fit_weights(window: usize, order: usize, offset: usize) -> Option<Vec<f64>> {
    let dim = order + 1;

    // Gram matrix of offset powers relative to the evaluation point
    let mut gram = vec![vec![0.0; dim]; dim];
    for a in 0..dim {
        for b in 0..dim {
            let mut sum = 0.0;
            for j in 0..window {
                let x = j as f64 - offset as f64;
                sum += x.powi((a + b) as i32);
            }
            gram[a][b] = sum;
        }
    }

    let coeffs = solve_unit_rhs(gram)?;

    let weights = (0..window)
        .map(|j| {
            let x = j as f64 - offset as f64;
            coeffs
                .iter()
                .enumerate()
                .map(|(k, c)| c * x.powi(k as i32))
                .sum()
        })
        .collect();

    Some(weights)
}

/// Solve `matrix * x = e0` by Gaussian elimination with partial pivoting
/// Returns None when a pivot collapses to zero
fn solve_unit_rhs(mut matrix: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let dim = matrix.len();
    let mut rhs = vec![0.0; dim];
    rhs[0] = 1.0;

    for col in 0..dim {
        // Pick the largest remaining pivot in this column
        let mut pivot_row = col;
        for row in col + 1..dim {
            if matrix[row][col].abs() > matrix[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if matrix[pivot_row][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in col + 1..dim {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..dim {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut solution = vec![0.0; dim];
    for col in (0..dim).rev() {
        let mut acc = rhs[col];
        for k in col + 1..dim {
            acc -= matrix[col][k] * solution[k];
        }
        solution[col] = acc / matrix[col][col];
    }

    Some(solution)
}
