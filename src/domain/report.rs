use crate::estimator::types::CostBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /estimate`: the three answers of the comparison form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateRequest {
    pub annual_revenue_gbp: f64,
    pub avg_transaction_gbp: f64,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub amortise_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub rank: usize,
    pub is_lowest: bool,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
    pub take_home_monthly: f64,
    pub transaction_fee_label: String,
    pub device_cost_gbp: f64,
    pub payout_days: u32,
    pub contract_note: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub create_account_url: Option<String>,
    pub tracking_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub monthly_revenue: f64,
    pub monthly_transactions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub annual_revenue_gbp: f64,
    pub avg_transaction_gbp: f64,
    pub channels: Vec<String>,
    pub amortise_months: u32,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

impl EstimateReport {
    pub fn best_value(&self) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.is_lowest)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

pub fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}
