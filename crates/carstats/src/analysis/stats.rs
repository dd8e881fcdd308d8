//! Statistical helpers shared by the analysis components.
//!
//! Undefined statistics are reported as `f64::NAN`, never as 0.0.

/// Arithmetic mean. NaN if the slice is empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Quantile by lower-index selection on an ascending slice.
///
/// Picks `sorted[floor(q * n)]` with no interpolation. `None` when empty.
pub fn lower_index_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (q * sorted.len() as f64).floor() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Pearson sample correlation coefficient of two equal-length series.
///
/// NaN when fewer than two pairs exist, the lengths differ, or either series
/// has zero variance.
pub fn sample_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return f64::NAN;
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    if sum_xx == 0.0 || sum_yy == 0.0 {
        return f64::NAN;
    }

    // The (n - 1) factors of covariance and both standard deviations cancel.
    (sum_xy / (sum_xx.sqrt() * sum_yy.sqrt())).clamp(-1.0, 1.0)
}
