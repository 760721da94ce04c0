pub mod catalog;
pub mod config;
pub mod domain {
    pub mod merchant;
    pub mod provider;
    pub mod report;
}
pub mod estimator;
pub mod http {
    pub mod handlers {
        pub mod estimate;
        pub mod ops;
        pub mod providers;
    }
    pub mod middleware {
        pub mod rate_limit;
    }
}
pub mod service {
    pub mod display;
    pub mod report_service;
}

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<catalog::ProviderCatalog>,
    pub report_service: service::report_service::ReportService,
}

impl AppState {
    pub fn new(catalog: catalog::ProviderCatalog, default_amortise_months: u32) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            report_service: service::report_service::ReportService::new(catalog.clone(), default_amortise_months),
            catalog,
        }
    }
}

pub fn build_router(state: AppState, rate_limit_per_minute: u32) -> Router {
    Router::new()
        .route("/health", get(http::handlers::ops::health))
        .route("/ops/readiness", get(http::handlers::ops::readiness))
        .route("/ops/liveness", get(http::handlers::ops::liveness))
        .route("/providers", get(http::handlers::providers::list_providers))
        .route("/providers/:provider_id", get(http::handlers::providers::get_provider))
        .route("/estimate", post(http::handlers::estimate::create_estimate))
        .layer(from_fn_with_state(
            http::middleware::rate_limit::RateLimitState::new(rate_limit_per_minute),
            http::middleware::rate_limit::enforce,
        ))
        .with_state(state)
}
