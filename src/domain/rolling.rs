//! Rolling-window statistics over close-price series.
//!
//! All functions return one entry per input period; entries inside the
//! warm-up region (fewer than `window` observations available) are `None`.
//! Standard deviations use the sample estimator (divides by n - 1), so a
//! window shorter than two observations is always undefined.

/// Period-over-period percentage change. Undefined at the first period.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for i in 1..values.len() {
        out[i] = Some(values[i] / values[i - 1] - 1.0);
    }
    out
}

/// Simple moving average over `window` trailing values.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..values.len() {
        let w = &values[i + 1 - window..=i];
        out[i] = Some(w.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Rolling sample standard deviation over `window` trailing values.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    rolling_std_opt(&wrapped, window)
}

/// Rolling sample standard deviation over optional values. A window that
/// contains any undefined entry is itself undefined.
pub fn rolling_std_opt(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 {
        return out;
    }
    for i in (window - 1)..values.len() {
        let w = &values[i + 1 - window..=i];
        if w.iter().any(|v| v.is_none()) {
            continue;
        }
        let n = window as f64;
        let mean = w.iter().filter_map(|v| *v).sum::<f64>() / n;
        let variance = w
            .iter()
            .filter_map(|v| *v)
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (n - 1.0);
        out[i] = Some(variance.sqrt());
    }
    out
}

/// Rolling volatility: sample standard deviation of percentage price changes
/// over `window` trailing periods. The first defined entry is at index
/// `window`, since the first percentage change is itself undefined.
pub fn rolling_volatility(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_std_opt(&pct_change(closes), window)
}
