//! Plain-text optimization summary.

use super::comparison::risk_reduction_percent;
use crate::types::RecommendationResult;

/// Labeled lines: total savings, risk reduction, total environmental impact.
pub fn summarize(result: &RecommendationResult) -> Vec<String> {
    vec![
        format!(
            "Total Potential Savings: ${}",
            format_thousands(result.total_savings(), 2)
        ),
        format!(
            "Risk Reduction: {:.1}%",
            risk_reduction_percent(&result.risk_comparison)
        ),
        format!(
            "Total Environmental Impact: {:.1} kg CO2e",
            result.total_environmental_impact()
        ),
    ]
}

/// Format with `,` thousands separators and a fixed number of decimals,
/// e.g. `4803.456` with 2 decimals -> `4,803.46`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(fixed.len() + digits / 3 + 1);
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
