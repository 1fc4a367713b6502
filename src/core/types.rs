use serde::{Deserialize, Serialize};

/// Age at which the projection horizon ends.
pub const RETIREMENT_AGE: u32 = 65;
/// Youngest age the planner accepts; younger inputs are clamped up.
pub const MIN_AGE: u32 = 18;
/// Oldest age the planner accepts; the horizon must be at least one year.
pub const MAX_AGE: u32 = RETIREMENT_AGE - 1;

/// Biweekly pay, used whenever a snapshot does not say otherwise.
pub const DEFAULT_PAYCHECKS_PER_YEAR: u32 = 26;
/// Cap on a fixed-dollar contribution when no snapshot is available to
/// derive the real half-paycheck limit.
pub const FALLBACK_MAX_PER_PAYCHECK: f64 = 2_000.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContributionType {
    Percentage,
    // The original wire format calls this "dollar".
    #[serde(alias = "dollar", alias = "fixed-amount")]
    FixedAmount,
}

impl ContributionType {
    /// Rate a freshly switched-to type starts at. A UX policy, not a
    /// derived value; deliberately independent of the snapshot.
    pub fn default_rate(self) -> f64 {
        match self {
            ContributionType::Percentage => 5.0,
            ContributionType::FixedAmount => 200.0,
        }
    }
}

/// A contribution election: how much of each paycheck goes into the account.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContributionSetting {
    #[serde(rename = "contributionType")]
    pub kind: ContributionType,
    /// Percent of paycheck for `Percentage`, dollars per paycheck for
    /// `FixedAmount`. Always non-negative after clamping.
    #[serde(rename = "contributionRate")]
    pub rate: f64,
}

impl ContributionSetting {
    pub fn new(kind: ContributionType, rate: f64) -> Self {
        Self { kind, rate }
    }
}

impl Default for ContributionSetting {
    fn default() -> Self {
        let kind = ContributionType::Percentage;
        Self {
            kind,
            rate: kind.default_rate(),
        }
    }
}

/// Payroll and account facts as of "now", refreshed from the account-data
/// collaborator after load and after any save.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdSnapshot {
    pub annual_salary: f64,
    pub paychecks_per_year: u32,
    pub pay_periods_elapsed: u32,
    pub ytd_contributions: f64,
    pub age: u32,
    pub current_settings: ContributionSetting,
}

impl YtdSnapshot {
    /// Gross amount of a single paycheck, guarding a zero divisor with the
    /// biweekly default.
    pub fn paycheck_amount(&self) -> f64 {
        let periods = if self.paychecks_per_year == 0 {
            DEFAULT_PAYCHECKS_PER_YEAR
        } else {
            self.paychecks_per_year
        };
        self.annual_salary / periods as f64
    }

    /// Upper bound on a fixed-dollar election: half of one paycheck.
    pub fn max_per_paycheck(&self) -> f64 {
        self.paycheck_amount() * 0.5
    }
}

/// Process-wide projection assumptions. The return rate is configuration,
/// not user input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Assumptions {
    pub annual_return_rate: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            annual_return_rate: 0.07,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectionInput {
    pub contribution_per_paycheck: f64,
    pub paychecks_per_year: u32,
    pub age: u32,
    pub annual_return_rate: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub annual_contribution: f64,
    pub years_to_retirement: u32,
    pub projected_retirement_savings: f64,
}

/// Clamp a user-supplied age into the plannable range.
pub fn clamp_age(age: u32) -> u32 {
    age.clamp(MIN_AGE, MAX_AGE)
}
