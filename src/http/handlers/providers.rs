use crate::domain::provider::{Channel, ChannelFees, Provider};
use crate::domain::report::err;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProviderView {
    pub provider_id: String,
    pub name: String,
    pub products: Vec<String>,
    pub device_cost_gbp: f64,
    pub monthly_fee_gbp: f64,
    pub transaction: ChannelFees,
    pub supported_channels: Vec<&'static str>,
    pub payout_days: u32,
    pub contract_note: &'static str,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub create_account_url: Option<String>,
}

impl From<&Provider> for ProviderView {
    fn from(p: &Provider) -> Self {
        Self {
            provider_id: p.id.clone(),
            name: p.name.clone(),
            products: p.products.clone(),
            device_cost_gbp: p.device_cost_gbp,
            monthly_fee_gbp: p.monthly_fee_gbp,
            transaction: p.transaction.clone(),
            supported_channels: Channel::ALL
                .iter()
                .filter(|c| p.fee(**c).is_supported())
                .map(|c| c.selection_key())
                .collect(),
            payout_days: p.payout_days_or_default(),
            contract_note: p.contract_note(),
            notes: p.notes.clone(),
            url: p.url.clone(),
            image_url: p.image_url.clone(),
            create_account_url: p.create_account_url.clone(),
        }
    }
}

pub async fn list_providers(State(state): State<AppState>) -> impl IntoResponse {
    let resp: Vec<ProviderView> = state
        .catalog
        .providers()
        .iter()
        .map(ProviderView::from)
        .collect();
    (axum::http::StatusCode::OK, Json(resp)).into_response()
}

pub async fn get_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.get(&provider_id) {
        Some(p) => (axum::http::StatusCode::OK, Json(ProviderView::from(p))).into_response(),
        None => (
            axum::http::StatusCode::NOT_FOUND,
            Json(err("PROVIDER_NOT_FOUND", "provider not found")),
        )
            .into_response(),
    }
}
