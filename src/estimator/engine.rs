use crate::domain::merchant::{ChannelMix, MerchantProfile};
use crate::domain::provider::{Channel, Provider};
use crate::estimator::mix::normalise_mix;
use crate::estimator::types::CostBreakdown;

pub const MIN_AVG_TRANSACTION_GBP: f64 = 0.01;

fn or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn blended(provider: &Provider, mix: &ChannelMix, f: impl Fn(&Provider, Channel) -> f64) -> f64 {
    Channel::ALL
        .iter()
        .map(|channel| or_zero(f(provider, *channel)) * mix.weight(*channel))
        .sum()
}

pub fn compute_cost(provider: &Provider, inputs: &MerchantProfile) -> CostBreakdown {
    let monthly_revenue = or_zero(inputs.annual_revenue_gbp) / 12.0;
    let avg_txn = or_zero(inputs.avg_transaction_gbp).max(MIN_AVG_TRANSACTION_GBP);
    // Fractional on purpose; rounding here skews the fixed-fee cost.
    let est_transactions = monthly_revenue / avg_txn;
    let mix = normalise_mix(&inputs.mix);

    let blended_pct = blended(provider, &mix, |p, c| p.fee(c).rate_pct.unwrap_or(0.0));
    let blended_fixed = blended(provider, &mix, |p, c| p.fee(c).fixed_gbp);

    let percent_fee_cost = monthly_revenue * blended_pct;
    // inf transactions at a zero fixed fee would otherwise give NaN
    let fixed_fee_cost = if blended_fixed == 0.0 {
        0.0
    } else {
        est_transactions * blended_fixed
    };
    let monthly_fee = or_zero(provider.monthly_fee_gbp);
    let device_amortised = match inputs.amortise_months {
        Some(months) if months > 0 => or_zero(provider.device_cost_gbp) / months as f64,
        _ => 0.0,
    };

    let total_monthly = percent_fee_cost + fixed_fee_cost + monthly_fee + device_amortised;

    CostBreakdown {
        provider_id: provider.id.clone(),
        provider_name: provider.name.clone(),
        monthly_revenue,
        est_transactions,
        blended_pct,
        blended_fixed,
        percent_fee_cost,
        fixed_fee_cost,
        monthly_fee,
        device_amortised,
        total_monthly,
    }
}

/// True when the provider has a rate for every channel the normalised mix
/// actually uses.
pub fn supports_mix(provider: &Provider, mix: &ChannelMix) -> bool {
    let mix = normalise_mix(mix);
    Channel::ALL
        .iter()
        .filter(|channel| mix.weight(**channel) > 0.0)
        .all(|channel| provider.fee(*channel).is_supported())
}

/// Cheapest first. Equal totals keep catalog order.
pub fn recommend(providers: &[Provider], inputs: &MerchantProfile) -> Vec<CostBreakdown> {
    let mut rows: Vec<CostBreakdown> = providers
        .iter()
        .filter(|provider| supports_mix(provider, &inputs.mix))
        .map(|provider| compute_cost(provider, inputs))
        .collect();

    rows.sort_by(|a, b| a.total_monthly.total_cmp(&b.total_monthly));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::{ChannelFee, ChannelFees};

    fn provider(id: &str, in_person: ChannelFee, online: ChannelFee, device: f64, monthly: f64) -> Provider {
        Provider {
            id: id.to_string(),
            name: id.to_string(),
            products: Vec::new(),
            device_cost_gbp: device,
            monthly_fee_gbp: monthly,
            transaction: ChannelFees {
                in_person,
                online,
                phone: ChannelFee::unsupported(),
            },
            payout_days: None,
            notes: None,
            url: None,
            image_url: None,
            create_account_url: None,
        }
    }

    fn profile(mix: ChannelMix, amortise_months: Option<u32>) -> MerchantProfile {
        MerchantProfile {
            annual_revenue_gbp: 200_000.0,
            avg_transaction_gbp: 50.0,
            mix,
            amortise_months,
        }
    }

    #[test]
    fn in_person_percentage_only() {
        let p = provider("square", ChannelFee::new(0.0175, 0.0), ChannelFee::new(0.0175, 0.0), 99.0, 0.0);
        let row = compute_cost(&p, &profile(ChannelMix::in_person_only(), Some(0)));

        assert!((row.monthly_revenue - 16_666.67).abs() < 0.01);
        assert!((row.est_transactions - 333.33).abs() < 0.01);
        assert!((row.percent_fee_cost - 291.67).abs() < 0.01);
        assert_eq!(row.fixed_fee_cost, 0.0);
        assert_eq!(row.device_amortised, 0.0);
        assert!((row.total_monthly - 291.67).abs() < 0.01);
    }

    #[test]
    fn amortises_device_cost() {
        let p = provider("p", ChannelFee::new(0.0, 0.0), ChannelFee::unsupported(), 120.0, 0.0);
        let row = compute_cost(&p, &profile(ChannelMix::in_person_only(), Some(12)));
        assert!((row.device_amortised - 10.0).abs() < 1e-9);
        assert!((row.total_monthly - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_fee_uses_fractional_transaction_count() {
        let p = provider("p", ChannelFee::new(0.0, 0.20), ChannelFee::unsupported(), 0.0, 0.0);
        let inputs = MerchantProfile {
            annual_revenue_gbp: 1_000.0,
            avg_transaction_gbp: 30.0,
            mix: ChannelMix::in_person_only(),
            amortise_months: None,
        };
        let row = compute_cost(&p, &inputs);
        let expected = (1_000.0 / 12.0) / 30.0 * 0.20;
        assert!((row.fixed_fee_cost - expected).abs() < 1e-12);
    }

    #[test]
    fn non_positive_avg_transaction_is_floored() {
        let p = provider("p", ChannelFee::new(0.0, 0.01), ChannelFee::unsupported(), 0.0, 0.0);
        let mut inputs = profile(ChannelMix::in_person_only(), None);
        inputs.avg_transaction_gbp = 0.0;
        let row = compute_cost(&p, &inputs);
        assert!(row.total_monthly.is_finite());
        assert!((row.est_transactions - row.monthly_revenue / MIN_AVG_TRANSACTION_GBP).abs() < 1e-6);

        inputs.avg_transaction_gbp = -5.0;
        assert!(compute_cost(&p, &inputs).total_monthly.is_finite());
    }

    #[test]
    fn total_is_sum_of_components() {
        let p = provider("p", ChannelFee::new(0.0139, 0.05), ChannelFee::new(0.025, 0.20), 79.0, 19.0);
        let row = compute_cost(&p, &profile(ChannelMix::new(0.3, 0.7, 0.0), Some(18)));
        assert_eq!(
            row.total_monthly,
            row.percent_fee_cost + row.fixed_fee_cost + row.monthly_fee + row.device_amortised
        );
    }

    #[test]
    fn excludes_provider_without_rate_for_weighted_channel() {
        let in_person_only = provider("reader", ChannelFee::new(0.0139, 0.05), ChannelFee::unsupported(), 0.0, 0.0);
        let both = provider("both", ChannelFee::new(0.02, 0.0), ChannelFee::new(0.02, 0.0), 0.0, 0.0);

        let ranked = recommend(
            &[in_person_only.clone(), both],
            &profile(ChannelMix::new(0.5, 0.5, 0.0), None),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].provider_id, "both");

        let ranked = recommend(&[in_person_only], &profile(ChannelMix::in_person_only(), None));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn overflowing_mix_still_excludes_unsupported_channel() {
        let reader = provider("reader", ChannelFee::new(0.0139, 0.05), ChannelFee::unsupported(), 0.0, 0.0);
        let ranked = recommend(&[reader], &profile(ChannelMix::new(1e308, 1e308, 0.0), None));
        assert!(ranked.is_empty());
    }

    #[test]
    fn extreme_revenue_without_fixed_fee_stays_finite() {
        let p = provider("p", ChannelFee::new(0.0175, 0.0), ChannelFee::unsupported(), 0.0, 0.0);
        let inputs = MerchantProfile {
            annual_revenue_gbp: 1e308,
            avg_transaction_gbp: 0.01,
            mix: ChannelMix::in_person_only(),
            amortise_months: None,
        };
        let row = compute_cost(&p, &inputs);
        assert_eq!(row.fixed_fee_cost, 0.0);
        assert!(row.total_monthly.is_finite());
    }

    #[test]
    fn zero_mix_only_needs_in_person() {
        let p = provider("reader", ChannelFee::new(0.0139, 0.0), ChannelFee::unsupported(), 0.0, 0.0);
        assert!(supports_mix(&p, &ChannelMix::default()));
    }

    #[test]
    fn ranks_cheapest_first_and_keeps_catalog_order_on_ties() {
        let a = provider("a", ChannelFee::new(0.0175, 0.0), ChannelFee::unsupported(), 0.0, 0.0);
        let b = provider("b", ChannelFee::new(0.0150, 0.0), ChannelFee::unsupported(), 0.0, 0.0);
        let c = provider("c", ChannelFee::new(0.0175, 0.0), ChannelFee::unsupported(), 0.0, 0.0);
        let ranked = recommend(&[a, b, c], &profile(ChannelMix::in_person_only(), None));

        let ids: Vec<&str> = ranked.iter().map(|r| r.provider_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(ranked.windows(2).all(|w| w[0].total_monthly <= w[1].total_monthly));
    }

    #[test]
    fn recommend_is_idempotent() {
        let providers = vec![
            provider("a", ChannelFee::new(0.0169, 0.0), ChannelFee::new(0.025, 0.0), 25.0, 0.0),
            provider("b", ChannelFee::new(0.016, 0.0), ChannelFee::new(0.022, 0.0), 0.0, 29.0),
        ];
        let inputs = profile(ChannelMix::new(1.0, 1.0, 0.0), Some(12));
        assert_eq!(recommend(&providers, &inputs), recommend(&providers, &inputs));
    }
}
