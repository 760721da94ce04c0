use anyhow::Context;
use card_fee_compare::catalog::ProviderCatalog;
use card_fee_compare::config::AppConfig;
use card_fee_compare::{build_router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let catalog = ProviderCatalog::load(cfg.catalog_path.as_deref())?;
    tracing::info!(
        "loaded {} providers from {}",
        catalog.len(),
        cfg.catalog_path.as_deref().unwrap_or("built-in catalog")
    );

    let state = AppState::new(catalog, cfg.default_amortise_months);
    let app = build_router(state, cfg.rate_limit_per_minute);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
