use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{
    Assumptions, ContributionSetting, ContributionType, CurrentImpact, IncrementalImpact,
    YtdSnapshot, current_impact, incremental_impact,
};
use crate::store::{SettingsStore, StoreError};

/// Payroll facts for the account holder, supplied by the account-data
/// collaborator. The demo profile mirrors a mid-year biweekly employee.
#[derive(Copy, Clone, Debug)]
pub struct AccountProfile {
    pub annual_salary: f64,
    pub paychecks_per_year: u32,
    pub pay_periods_elapsed: u32,
    pub ytd_contributions: f64,
    pub age: u32,
}

impl AccountProfile {
    pub fn demo() -> Self {
        Self {
            annual_salary: 75_000.0,
            paychecks_per_year: 26,
            pay_periods_elapsed: 13,
            ytd_contributions: 4_500.0,
            age: 22,
        }
    }

    /// Merge the saved election into the payroll facts.
    pub fn snapshot(&self, current_settings: ContributionSetting) -> YtdSnapshot {
        YtdSnapshot {
            annual_salary: self.annual_salary,
            paychecks_per_year: self.paychecks_per_year,
            pay_periods_elapsed: self.pay_periods_elapsed,
            ytd_contributions: self.ytd_contributions,
            age: self.age,
            current_settings,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SettingsStore,
    pub profile: AccountProfile,
    pub assumptions: Assumptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SaveSettingsPayload {
    contribution_type: Option<ContributionType>,
    contribution_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImpactQuery {
    age: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct IncrementalQuery {
    current_rate: Option<f64>,
    new_rate: Option<f64>,
    contribution_type: Option<ContributionType>,
    age: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct YtdResponse {
    #[serde(flatten)]
    snapshot: YtdSnapshot,
    current_contribution_per_paycheck: f64,
    projected_annual_contribution: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16, state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("contribution planner API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/contribution-settings",
            get(get_settings_handler).post(save_settings_handler),
        )
        .route("/api/ytd-data", get(ytd_data_handler))
        .route(
            "/api/current-contribution-impact",
            get(current_impact_handler),
        )
        .route("/api/retirement-impact", get(retirement_impact_handler))
        .fallback(not_found_handler)
        .with_state(Arc::new(state))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Response {
    json_response(StatusCode::OK, state.store.load())
}

async fn save_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveSettingsPayload>,
) -> Response {
    let setting = match setting_from_payload(payload) {
        Ok(setting) => setting,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match state.store.save(setting) {
        Ok(saved) => json_response(StatusCode::OK, saved),
        Err(e @ (StoreError::NegativeRate | StoreError::PercentageOverflow)) => {
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            log::error!("failed to persist contribution settings: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update contribution settings",
            )
        }
    }
}

async fn ytd_data_handler(State(state): State<Arc<AppState>>) -> Response {
    json_response(StatusCode::OK, build_ytd_response(&state))
}

async fn current_impact_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImpactQuery>,
) -> Response {
    json_response(StatusCode::OK, build_current_impact(&state, query))
}

async fn retirement_impact_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IncrementalQuery>,
) -> Response {
    json_response(StatusCode::OK, build_incremental_impact(&state, query))
}

fn setting_from_payload(payload: SaveSettingsPayload) -> Result<ContributionSetting, String> {
    let Some(kind) = payload.contribution_type else {
        return Err("Invalid contribution type. Must be \"percentage\" or \"dollar\"".to_string());
    };
    let Some(rate) = payload.contribution_rate else {
        return Err("Invalid contribution rate. Must be a positive number".to_string());
    };
    Ok(ContributionSetting::new(kind, rate))
}

fn build_ytd_response(state: &AppState) -> YtdResponse {
    let saved = state.store.load().setting();
    let snapshot = state.profile.snapshot(saved);
    let amounts = crate::core::amounts(saved, &snapshot);
    YtdResponse {
        snapshot,
        current_contribution_per_paycheck: amounts.per_paycheck,
        projected_annual_contribution: amounts.annual,
    }
}

fn build_current_impact(state: &AppState, query: ImpactQuery) -> CurrentImpact {
    let saved = state.store.load().setting();
    let snapshot = state.profile.snapshot(saved);
    // Out-of-range ages are clamped inside the engine.
    let age = query.age.unwrap_or(snapshot.age);
    current_impact(saved, &snapshot, age, state.assumptions)
}

fn build_incremental_impact(state: &AppState, query: IncrementalQuery) -> IncrementalImpact {
    let saved = state.store.load().setting();
    let snapshot = state.profile.snapshot(saved);
    // Malformed or absent numeric params normalize to safe defaults before
    // the engine sees them.
    let kind = query
        .contribution_type
        .unwrap_or(ContributionType::Percentage);
    let current_rate = query.current_rate.unwrap_or(0.0);
    let new_rate = query.new_rate.unwrap_or(0.0);
    let age = query.age.unwrap_or(snapshot.age);
    incremental_impact(current_rate, new_rate, kind, &snapshot, age, state.assumptions)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    const EPS: f64 = 1e-6;

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn scratch_state() -> AppState {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "nestegg-api-test-{}-{n}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        AppState {
            store: SettingsStore::new(path),
            profile: AccountProfile::demo(),
            assumptions: Assumptions::default(),
        }
    }

    fn cleanup(state: &AppState) {
        let _ = fs::remove_file(state.store.path());
    }

    #[test]
    fn save_payload_requires_both_fields() {
        let err = setting_from_payload(SaveSettingsPayload::default())
            .expect_err("empty payload must be rejected");
        assert!(err.contains("contribution type"));

        let err = setting_from_payload(SaveSettingsPayload {
            contribution_type: Some(ContributionType::Percentage),
            contribution_rate: None,
        })
        .expect_err("missing rate must be rejected");
        assert!(err.contains("contribution rate"));
    }

    #[test]
    fn save_payload_parses_legacy_wire_keys() {
        let payload: SaveSettingsPayload =
            serde_json::from_str(r#"{"contributionType": "dollar", "contributionRate": 250}"#)
                .expect("payload parses");
        let setting = setting_from_payload(payload).expect("valid payload");
        assert_eq!(setting.kind, ContributionType::FixedAmount);
        assert_approx(setting.rate, 250.0);
    }

    #[test]
    fn incremental_query_parses_wire_keys_and_defaults() {
        let query: IncrementalQuery = serde_json::from_str(
            r#"{"currentRate": 5, "newRate": 8, "contributionType": "percentage", "age": 30}"#,
        )
        .expect("query parses");
        assert_eq!(query.current_rate, Some(5.0));
        assert_eq!(query.new_rate, Some(8.0));
        assert_eq!(query.age, Some(30));

        let empty: IncrementalQuery = serde_json::from_str("{}").expect("empty query parses");
        assert_eq!(empty.current_rate, None);
        assert_eq!(empty.contribution_type, None);
    }

    #[test]
    fn ytd_response_derives_amounts_for_the_saved_setting() {
        let state = scratch_state();
        state
            .store
            .save(ContributionSetting::new(ContributionType::Percentage, 5.0))
            .expect("save succeeds");

        let response = build_ytd_response(&state);
        // 5% of a $2,884.62 biweekly paycheck.
        assert_approx(response.current_contribution_per_paycheck, 144.23076923076923);
        assert_approx(response.projected_annual_contribution, 3_750.0);
        assert_eq!(response.snapshot.age, 22);
        assert_eq!(
            response.snapshot.current_settings.kind,
            ContributionType::Percentage
        );
        cleanup(&state);
    }

    #[test]
    fn ytd_response_serializes_flattened_wire_fields() {
        let state = scratch_state();
        let json = serde_json::to_string(&build_ytd_response(&state)).expect("serializes");
        assert!(json.contains("\"annualSalary\""));
        assert!(json.contains("\"ytdContributions\""));
        assert!(json.contains("\"payPeriodsElapsed\""));
        assert!(json.contains("\"currentSettings\""));
        assert!(json.contains("\"currentContributionPerPaycheck\""));
        assert!(json.contains("\"projectedAnnualContribution\""));
        cleanup(&state);
    }

    #[test]
    fn current_impact_defaults_age_to_the_profile() {
        let state = scratch_state();
        let impact = build_current_impact(&state, ImpactQuery { age: None });
        // Demo profile holder is 22.
        assert_eq!(impact.years_to_retirement, 43);

        let impact = build_current_impact(&state, ImpactQuery { age: Some(70) });
        assert_eq!(impact.years_to_retirement, 1);

        let impact = build_current_impact(&state, ImpactQuery { age: Some(17) });
        assert_eq!(impact.years_to_retirement, 47);
        cleanup(&state);
    }

    #[test]
    fn current_impact_serializes_wire_fields() {
        let state = scratch_state();
        let impact = build_current_impact(&state, ImpactQuery { age: Some(30) });
        let json = serde_json::to_string(&impact).expect("serializes");
        assert!(json.contains("\"contributionPerPaycheck\""));
        assert!(json.contains("\"annualContribution\""));
        assert!(json.contains("\"yearsToRetirement\""));
        assert!(json.contains("\"projectedRetirementSavings\""));
        assert!(json.contains("\"annualReturnRate\""));
        cleanup(&state);
    }

    #[test]
    fn incremental_impact_normalizes_missing_params_to_zero() {
        let state = scratch_state();
        let impact = build_incremental_impact(&state, IncrementalQuery::default());
        assert_approx(impact.additional_contribution_per_paycheck, 0.0);
        assert_approx(impact.projected_retirement_savings, 0.0);
        cleanup(&state);
    }

    #[test]
    fn incremental_impact_projects_an_increase() {
        let state = scratch_state();
        let impact = build_incremental_impact(
            &state,
            IncrementalQuery {
                current_rate: Some(5.0),
                new_rate: Some(8.0),
                contribution_type: Some(ContributionType::Percentage),
                age: Some(30),
            },
        );
        assert!(impact.additional_contribution_per_paycheck > 0.0);
        assert!(impact.projected_retirement_savings > 0.0);
        assert_eq!(impact.years_to_retirement, 35);

        let json = serde_json::to_string(&impact).expect("serializes");
        assert!(json.contains("\"additionalContributionPerPaycheck\""));
        assert!(json.contains("\"additionalAnnualContribution\""));
        cleanup(&state);
    }
}
