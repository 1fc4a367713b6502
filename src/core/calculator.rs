use super::types::{
    ContributionSetting, ContributionType, DEFAULT_PAYCHECKS_PER_YEAR, FALLBACK_MAX_PER_PAYCHECK,
    YtdSnapshot,
};

/// Per-paycheck and annual contribution amounts derived from one setting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaycheckAmounts {
    pub per_paycheck: f64,
    pub annual: f64,
}

/// Upper bound the rate is clamped against for a given type. Without a
/// snapshot the fixed-dollar cap falls back to a flat constant.
pub fn max_rate(kind: ContributionType, snapshot: Option<&YtdSnapshot>) -> f64 {
    match kind {
        ContributionType::Percentage => 100.0,
        ContributionType::FixedAmount => snapshot
            .map(YtdSnapshot::max_per_paycheck)
            .unwrap_or(FALLBACK_MAX_PER_PAYCHECK),
    }
}

/// Clamp a raw rate into the allowed range for its type. Out-of-range input
/// is corrected rather than rejected; non-finite input degrades to 0.
pub fn clamp_rate(kind: ContributionType, rate: f64, snapshot: Option<&YtdSnapshot>) -> f64 {
    if !rate.is_finite() {
        return 0.0;
    }
    rate.clamp(0.0, max_rate(kind, snapshot))
}

/// Derive per-paycheck and annual amounts for a setting against the current
/// payroll facts. Pure function of its inputs.
pub fn amounts(setting: ContributionSetting, snapshot: &YtdSnapshot) -> PaycheckAmounts {
    let rate = clamp_rate(setting.kind, setting.rate, Some(snapshot));
    let per_paycheck = match setting.kind {
        ContributionType::Percentage => snapshot.paycheck_amount() * (rate / 100.0),
        ContributionType::FixedAmount => rate,
    };
    let periods = if snapshot.paychecks_per_year == 0 {
        DEFAULT_PAYCHECKS_PER_YEAR
    } else {
        snapshot.paychecks_per_year
    };
    PaycheckAmounts {
        per_paycheck,
        annual: per_paycheck * periods as f64,
    }
}
