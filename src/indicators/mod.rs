pub mod rsi;
pub mod sma;

pub use rsi::Rsi;

pub trait TechnicalIndicator {
    fn calculate(&self, prices: &[f64]) -> Result<IndicatorValue, String>;
    fn name(&self) -> &str;
}

/// Indicator output, one value per input price
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Vector(Vec<f64>),
}

/// Replace missing (NaN) values with the previous known value.
/// Leading NaNs have nothing to copy from and stay NaN.
pub fn forward_fill(values: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    values
        .iter()
        .map(|&v| {
            if !v.is_nan() {
                last = v;
            }
            last
        })
        .collect()
}
