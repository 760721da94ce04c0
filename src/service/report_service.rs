use crate::catalog::ProviderCatalog;
use crate::domain::merchant::{ChannelMix, MerchantProfile};
use crate::domain::provider::{Channel, DEFAULT_PAYOUT_DAYS};
use crate::domain::report::{err, ErrorEnvelope, EstimateReport, EstimateRequest, ReportRow, ReportSummary};
use crate::estimator::engine::{recommend, MIN_AVG_TRANSACTION_GBP};
use crate::service::display::{fee_label_for, tracking_id};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound on accepted annual revenue; keeps every estimate finite.
pub const MAX_ANNUAL_REVENUE_GBP: f64 = 1e12;

#[derive(Clone)]
pub struct ReportService {
    pub catalog: Arc<ProviderCatalog>,
    pub default_amortise_months: u32,
}

impl ReportService {
    pub fn new(catalog: Arc<ProviderCatalog>, default_amortise_months: u32) -> Self {
        Self {
            catalog,
            default_amortise_months,
        }
    }

    pub fn estimate(&self, req: EstimateRequest) -> Result<EstimateReport, (StatusCode, ErrorEnvelope)> {
        validate_request(&req)?;
        let channels = parse_channels(&req.channels)?;
        let amortise_months = req.amortise_months.unwrap_or(self.default_amortise_months);

        let profile = MerchantProfile {
            annual_revenue_gbp: req.annual_revenue_gbp,
            avg_transaction_gbp: req.avg_transaction_gbp,
            mix: ChannelMix::from_channels(&channels),
            amortise_months: Some(amortise_months),
        };

        let ranked = recommend(self.catalog.providers(), &profile);
        let rows: Vec<ReportRow> = ranked
            .into_iter()
            .enumerate()
            .map(|(index, breakdown)| {
                let provider = self.catalog.get(&breakdown.provider_id);
                let url = provider.and_then(|p| p.url.clone());
                ReportRow {
                    rank: index + 1,
                    is_lowest: index == 0,
                    take_home_monthly: breakdown.monthly_revenue - breakdown.total_monthly,
                    transaction_fee_label: fee_label_for(&breakdown),
                    device_cost_gbp: provider.map(|p| p.device_cost_gbp).unwrap_or(0.0),
                    payout_days: provider
                        .map(|p| p.payout_days_or_default())
                        .unwrap_or(DEFAULT_PAYOUT_DAYS),
                    contract_note: provider
                        .map(|p| p.contract_note().to_string())
                        .unwrap_or_default(),
                    create_account_url: provider
                        .and_then(|p| p.create_account_url.clone())
                        .or_else(|| url.clone()),
                    url,
                    image_url: provider.and_then(|p| p.image_url.clone()),
                    tracking_id: tracking_id(&breakdown.provider_name),
                    breakdown,
                }
            })
            .collect();

        let monthly_revenue = req.annual_revenue_gbp / 12.0;
        let summary = ReportSummary {
            monthly_revenue,
            monthly_transactions: (monthly_revenue / req.avg_transaction_gbp.max(MIN_AVG_TRANSACTION_GBP))
                .round() as u64,
        };

        let channel_keys: Vec<String> = channels.iter().map(|c| c.selection_key().to_string()).collect();
        tracing::info!(
            "estimate annual_revenue={} avg_transaction={} channels={:?} rows={} best={:?}",
            req.annual_revenue_gbp,
            req.avg_transaction_gbp,
            channel_keys,
            rows.len(),
            rows.first().map(|r| r.breakdown.provider_id.as_str())
        );

        Ok(EstimateReport {
            report_id: Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            annual_revenue_gbp: req.annual_revenue_gbp,
            avg_transaction_gbp: req.avg_transaction_gbp,
            channels: channel_keys,
            amortise_months,
            summary,
            rows,
        })
    }
}

fn validate_request(req: &EstimateRequest) -> Result<(), (StatusCode, ErrorEnvelope)> {
    if !req.annual_revenue_gbp.is_finite()
        || req.annual_revenue_gbp <= 0.0
        || req.annual_revenue_gbp > MAX_ANNUAL_REVENUE_GBP
    {
        return Err((
            StatusCode::BAD_REQUEST,
            err(
                "INVALID_ANNUAL_REVENUE",
                "annual_revenue_gbp must be > 0 and at most 1000000000000",
            ),
        ));
    }
    if !req.avg_transaction_gbp.is_finite() || req.avg_transaction_gbp <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            err("INVALID_AVG_TRANSACTION", "avg_transaction_gbp must be > 0"),
        ));
    }
    if req.channels.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            err("NO_CHANNELS_SELECTED", "select at least one payment channel"),
        ));
    }
    Ok(())
}

fn parse_channels(keys: &[String]) -> Result<Vec<Channel>, (StatusCode, ErrorEnvelope)> {
    keys.iter()
        .map(|key| {
            Channel::from_selection_key(key).ok_or_else(|| {
                let mut envelope = err("UNKNOWN_CHANNEL", "channel must be one of in-person, online, over-phone");
                envelope.error.details = Some(key.clone());
                (StatusCode::BAD_REQUEST, envelope)
            })
        })
        .collect()
}
