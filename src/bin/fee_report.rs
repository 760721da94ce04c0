use anyhow::{anyhow, Result};
use card_fee_compare::catalog::ProviderCatalog;
use card_fee_compare::config::AppConfig;
use card_fee_compare::domain::report::EstimateRequest;
use card_fee_compare::service::display::round2;
use card_fee_compare::service::report_service::ReportService;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Ranks the catalog's card machine providers by estimated monthly cost
#[derive(Parser, Debug)]
#[command(name = "fee_report")]
#[command(about = "Ranks card machine providers by estimated monthly cost")]
struct FeeReportArgs {
    /// Annual card revenue in GBP
    annual_revenue_gbp: f64,
    /// Average transaction value in GBP
    avg_transaction_gbp: f64,
    /// Payment channels: in-person, online, over-phone
    #[arg(value_delimiter = ',', required = true)]
    channels: Vec<String>,
    /// Months to spread the device cost over (0 disables amortisation)
    #[arg(long)]
    amortise_months: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = FeeReportArgs::parse();
    let channels: Vec<String> = args
        .channels
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let cfg = AppConfig::from_env()?;
    let catalog = ProviderCatalog::load(cfg.catalog_path.as_deref())?;
    let service = ReportService::new(Arc::new(catalog), cfg.default_amortise_months);

    let report = service
        .estimate(EstimateRequest {
            annual_revenue_gbp: args.annual_revenue_gbp,
            avg_transaction_gbp: args.avg_transaction_gbp,
            channels,
            amortise_months: args.amortise_months,
        })
        .map_err(|(_, body)| anyhow!("{}: {}", body.error.code, body.error.message))?;

    println!(
        "monthly revenue £{:.0}, about {} transactions, device cost over {} months",
        report.summary.monthly_revenue, report.summary.monthly_transactions, report.amortise_months
    );
    if report.rows.is_empty() {
        println!("no provider in the catalog supports {}", report.channels.join(" + "));
        return Ok(());
    }
    for row in &report.rows {
        println!(
            "{:>2}. {:<28} £{:>9.2}/month  take-home £{:>10.2}  {}{}",
            row.rank,
            row.breakdown.provider_name,
            round2(row.breakdown.total_monthly),
            round2(row.take_home_monthly),
            row.transaction_fee_label,
            if row.is_lowest { "  (lowest cost)" } else { "" }
        );
    }
    Ok(())
}
