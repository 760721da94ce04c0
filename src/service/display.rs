use crate::estimator::types::CostBreakdown;

/// "1.69%" or "1.39% + 5p" from the blended rate and fixed fee.
pub fn transaction_fee_label(blended_pct: f64, blended_fixed: f64) -> String {
    let pct = format!("{:.2}%", blended_pct * 100.0);
    let pence = (blended_fixed * 100.0).round();
    if pence > 0.0 {
        format!("{} + {:.0}p", pct, pence)
    } else {
        pct
    }
}

pub fn fee_label_for(row: &CostBreakdown) -> String {
    transaction_fee_label(row.blended_pct, row.blended_fixed)
}

/// Lower-cased provider name with whitespace runs collapsed to `-`.
pub fn tracking_id(provider_name: &str) -> String {
    provider_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
