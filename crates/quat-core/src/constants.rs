/// Absolute per-component tolerance for zero tests and equality.
pub const EPS: f64 = 0.001;

/// Decimal digits written for each component by `Display`.
pub const DISPLAY_PRECISION: usize = 2;
