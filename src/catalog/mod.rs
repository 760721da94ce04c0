use crate::domain::provider::{Channel, Provider};
use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

const BUILTIN_CATALOG: &str = include_str!("providers.json");

static BUILTIN: OnceLock<Result<Vec<Provider>, String>> = OnceLock::new();

/// Read-only provider list, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
}

impl ProviderCatalog {
    pub fn new(providers: Vec<Provider>) -> Result<Self> {
        let catalog = Self { providers };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parsed and validated on first use; later calls reuse the result.
    pub fn builtin() -> Result<Self> {
        let parsed = BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_CATALOG)
                .map(|catalog| catalog.providers)
                .map_err(|e| format!("{:#}", e))
        });
        match parsed {
            Ok(providers) => Ok(Self {
                providers: providers.clone(),
            }),
            Err(e) => Err(anyhow!("{}", e)).context("built-in provider catalog"),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let providers: Vec<Provider> =
            serde_json::from_str(raw).context("provider catalog is not valid JSON")?;
        Self::new(providers)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading provider catalog {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("loading provider catalog {}", path.display()))
    }

    /// Uses the file at `path` when given, otherwise the built-in list.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn get(&self, provider_id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == provider_id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            bail!("provider catalog is empty");
        }

        let mut seen = HashSet::new();
        for p in &self.providers {
            if p.id.trim().is_empty() {
                bail!("provider with name {:?} has an empty id", p.name);
            }
            if p.name.trim().is_empty() {
                bail!("provider {} has an empty name", p.id);
            }
            if !seen.insert(p.id.as_str()) {
                bail!("duplicate provider id {}", p.id);
            }
            check_amount(&p.id, "deviceCostGBP", p.device_cost_gbp)?;
            check_amount(&p.id, "monthlyFeeGBP", p.monthly_fee_gbp)?;

            for channel in Channel::ALL {
                let fee = p.fee(channel);
                let field = channel.selection_key();
                check_amount(&p.id, &format!("{field}.fixedGBP"), fee.fixed_gbp)?;
                if let Some(rate) = fee.rate_pct {
                    check_amount(&p.id, &format!("{field}.ratePct"), rate)?;
                    // 1.69% is stored as 0.0169
                    if rate >= 1.0 {
                        bail!(
                            "provider {} {}.ratePct={} looks like a percentage, expected a fraction",
                            p.id,
                            field,
                            rate
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_amount(provider_id: &str, field: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        bail!("provider {} has invalid {}: {}", provider_id, field, v);
    }
    Ok(())
}
