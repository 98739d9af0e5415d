//! Unit conversion utilities
//!
//! Everything in the planning core is expressed in millimetres. These helpers
//! format values for labels and vector output.

/// Tolerance used when comparing millimetre values
pub const MM_EPSILON: f64 = 1e-9;

/// Format a millimetre value for a label
///
/// Whole values print without decimals ("50"), others with up to two
/// decimals and trailing zeros removed ("37.7", "75.4").
pub fn format_mm(value_mm: f64) -> String {
    let rounded = (value_mm * 100.0).round() / 100.0;
    if rounded.fract().abs() < MM_EPSILON {
        return format!("{:.0}", rounded);
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a coordinate for vector output (three decimals, 1 µm resolution)
pub fn format_coord(value_mm: f64) -> String {
    let text = format!("{:.3}", value_mm);
    // Avoid "-0.000"
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}
