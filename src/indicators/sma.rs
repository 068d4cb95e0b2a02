// Simple moving average used by the RSI gain/loss windows

/// Rolling mean with a warm-up: the first `period - 1` points average over
/// whatever is available so far (pandas `min_periods=1`). NaN inputs are
/// skipped; a window with no valid value yields NaN.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(period);
        let (sum, count) = values[start..=i]
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        out.push(if count == 0 { f64::NAN } else { sum / count as f64 });
    }
    out
}
