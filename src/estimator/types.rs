use serde::{Deserialize, Serialize};

/// Every intermediate value of one provider's monthly estimate, so the total
/// can be reproduced from the row alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub provider_id: String,
    pub provider_name: String,
    pub monthly_revenue: f64,
    pub est_transactions: f64,
    pub blended_pct: f64,
    pub blended_fixed: f64,
    pub percent_fee_cost: f64,
    pub fixed_fee_cost: f64,
    pub monthly_fee: f64,
    pub device_amortised: f64,
    pub total_monthly: f64,
}
