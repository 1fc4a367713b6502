use super::types::{
    DEFAULT_PAYCHECKS_PER_YEAR, ProjectionInput, ProjectionResult, RETIREMENT_AGE,
};

/// Compound a stream of future contributions to a balance at age 65.
///
/// Contributions are treated as an ordinary annuity of one annual payment,
/// compounded annually. Mid-year starts are not prorated; the first partial
/// year counts as a full one, matching the behaviour the planner has always
/// shown.
pub fn project(input: ProjectionInput) -> ProjectionResult {
    debug_assert!(
        input.contribution_per_paycheck >= 0.0,
        "negative contributions are clamped before projection"
    );

    let years_to_retirement = RETIREMENT_AGE.saturating_sub(input.age);
    let periods = if input.paychecks_per_year == 0 {
        DEFAULT_PAYCHECKS_PER_YEAR
    } else {
        input.paychecks_per_year
    };
    let annual_contribution = input.contribution_per_paycheck * periods as f64;

    let n = years_to_retirement as f64;
    let r = input.annual_return_rate;
    // FV of an ordinary annuity: PMT * ((1+r)^n - 1) / r, degenerate at r=0.
    let projected_retirement_savings = if r > 0.0 {
        annual_contribution * (((1.0 + r).powf(n) - 1.0) / r)
    } else {
        annual_contribution * n
    };

    ProjectionResult {
        annual_contribution,
        years_to_retirement,
        projected_retirement_savings,
    }
}
