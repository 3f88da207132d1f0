/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input, since an absent average must never read as zero delay.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
