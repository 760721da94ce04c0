use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub catalog_path: Option<String>,
    pub default_amortise_months: u32,
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").ok().filter(|s| !s.trim().is_empty()),
            default_amortise_months: parse_var("DEFAULT_AMORTISE_MONTHS", 12)?,
            rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", 300)?,
        })
    }
}

fn parse_var(name: &str, default: u32) -> Result<u32> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
