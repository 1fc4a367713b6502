mod calculator;
mod impact;
mod projector;
mod session;
mod types;

pub use calculator::{PaycheckAmounts, amounts, clamp_rate, max_rate};
pub use impact::{CurrentImpact, IncrementalImpact, current_impact, incremental_impact};
pub use projector::project;
pub use session::{EngineError, PlannerSession, RecomputeOutput};
pub use types::{
    Assumptions, ContributionSetting, ContributionType, DEFAULT_PAYCHECKS_PER_YEAR,
    FALLBACK_MAX_PER_PAYCHECK, MAX_AGE, MIN_AGE, ProjectionInput, ProjectionResult,
    RETIREMENT_AGE, YtdSnapshot, clamp_age,
};
