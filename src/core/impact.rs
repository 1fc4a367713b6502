use serde::Serialize;

use super::calculator::{self, PaycheckAmounts};
use super::projector::project;
use super::types::{
    Assumptions, ContributionSetting, ContributionType, ProjectionInput, YtdSnapshot, clamp_age,
};

/// Projection of the saved contribution election, reported as-is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentImpact {
    pub contribution_per_paycheck: f64,
    pub annual_contribution: f64,
    pub years_to_retirement: u32,
    pub projected_retirement_savings: f64,
    pub annual_return_rate: f64,
    pub contribution_type: ContributionType,
    pub contribution_rate: f64,
}

/// Marginal effect of moving from the saved rate to a candidate rate.
///
/// The projector runs on the *delta* annuity alone, so this figure and
/// [`CurrentImpact`] add up to the candidate's full projection without
/// compounding logic existing twice.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementalImpact {
    pub additional_contribution_per_paycheck: f64,
    pub additional_annual_contribution: f64,
    pub years_to_retirement: u32,
    pub projected_retirement_savings: f64,
    pub annual_return_rate: f64,
}

/// Contract A: calculator then projector for the saved setting.
pub fn current_impact(
    setting: ContributionSetting,
    snapshot: &YtdSnapshot,
    age: u32,
    assumptions: Assumptions,
) -> CurrentImpact {
    let age = clamp_age(age);
    let PaycheckAmounts { per_paycheck, .. } = calculator::amounts(setting, snapshot);
    let projection = project(ProjectionInput {
        contribution_per_paycheck: per_paycheck,
        paychecks_per_year: snapshot.paychecks_per_year,
        age,
        annual_return_rate: assumptions.annual_return_rate,
    });
    CurrentImpact {
        contribution_per_paycheck: per_paycheck,
        annual_contribution: projection.annual_contribution,
        years_to_retirement: projection.years_to_retirement,
        projected_retirement_savings: projection.projected_retirement_savings,
        annual_return_rate: assumptions.annual_return_rate,
        contribution_type: setting.kind,
        contribution_rate: setting.rate,
    }
}

/// Contract B: project the delta between a candidate rate and the saved rate
/// of the same type. A decrease keeps its (negative) delta amounts but
/// reports a zero projection; there is no regression display.
pub fn incremental_impact(
    saved_rate: f64,
    candidate_rate: f64,
    kind: ContributionType,
    snapshot: &YtdSnapshot,
    age: u32,
    assumptions: Assumptions,
) -> IncrementalImpact {
    let age = clamp_age(age);
    let saved = calculator::amounts(ContributionSetting::new(kind, saved_rate), snapshot);
    let candidate = calculator::amounts(ContributionSetting::new(kind, candidate_rate), snapshot);

    let additional_per_paycheck = candidate.per_paycheck - saved.per_paycheck;
    let additional_annual = candidate.annual - saved.annual;

    let projection = project(ProjectionInput {
        contribution_per_paycheck: additional_per_paycheck.max(0.0),
        paychecks_per_year: snapshot.paychecks_per_year,
        age,
        annual_return_rate: assumptions.annual_return_rate,
    });

    IncrementalImpact {
        additional_contribution_per_paycheck: additional_per_paycheck,
        additional_annual_contribution: additional_annual,
        years_to_retirement: projection.years_to_retirement,
        projected_retirement_savings: projection.projected_retirement_savings,
        annual_return_rate: assumptions.annual_return_rate,
    }
}
