use crate::advice::{kelly, RiskAversion};
use crate::calendar::assembler::{self, AdvisedFixture, BetAdvice};
use crate::calendar::upcoming;
use crate::errors::ServiceResult;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use portable_atomic::Ordering::Relaxed;
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct CalendarQuery {
    pub user: String,
}

#[derive(serde::Deserialize)]
pub struct PredictRequest {
    pub championship: String,
    pub home_team: String,
    pub away_team: String,
    pub user: String,
}

#[derive(serde::Deserialize)]
pub struct AdviceRequest {
    pub probabilities: Vec<f64>,
    pub odds: Vec<f64>,
    pub bankroll: f64,
    pub risk: RiskAversion,
}

#[derive(serde::Serialize)]
pub struct AdviceResponse {
    pub fraction: f64,
    pub stake: f64,
}

/// GET /api/health -- liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/championships -- configured championship names
pub async fn get_championships(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.calendars.championships())
}

/// GET /api/championship/{championship}/calendar?user=NAME
/// Upcoming fixtures with predictions and a per-row `bet_advise`.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(championship): Path<String>,
    Query(params): Query<CalendarQuery>,
) -> ServiceResult<Json<Vec<AdvisedFixture>>> {
    let profile = state.profiles.profile(&params.user)?;
    let records = state.calendars.calendar(&championship)?;

    let today = chrono::Utc::now().date_naive();
    let fixtures: Vec<_> = upcoming(records, today).into_iter().cloned().collect();
    let advised = assembler::advise_calendar(&fixtures, &profile);

    for row in &advised {
        match row.bet_advise {
            BetAdvice::Stake(_) => state.counters.advice_computed.fetch_add(1, Relaxed),
            BetAdvice::Unavailable { .. } => {
                state.counters.advice_unavailable.fetch_add(1, Relaxed)
            }
        };
    }
    state.counters.calendars_served.fetch_add(1, Relaxed);

    tracing::info!(
        championship = %championship,
        user = %params.user,
        fixtures = advised.len(),
        "calendar served"
    );
    Ok(Json(advised))
}

/// POST /api/predict -- prediction and advice for a single fixture
pub async fn post_predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> ServiceResult<Json<AdvisedFixture>> {
    let profile = state.profiles.profile(&req.user)?;
    let fixture = state
        .calendars
        .find_fixture(&req.championship, &req.home_team, &req.away_team)?;

    let advised = AdvisedFixture {
        fixture: fixture.clone(),
        bet_advise: assembler::advise_fixture(fixture, &profile),
    };
    state.counters.predictions_served.fetch_add(1, Relaxed);

    Ok(Json(advised))
}

/// POST /api/advice -- direct engine access with explicit inputs.
/// Failures surface as typed errors here, never as a wrong stake.
pub async fn post_advice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdviceRequest>,
) -> ServiceResult<Json<AdviceResponse>> {
    let fraction = kelly::compute_optimal_fraction(&req.probabilities, &req.odds, req.risk)?;
    let stake = kelly::generate_bet_advice(&req.probabilities, req.bankroll, req.risk, &req.odds)?;
    state.counters.advice_computed.fetch_add(1, Relaxed);

    Ok(Json(AdviceResponse { fraction, stake }))
}

/// GET /api/counters -- performance counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "advice_computed": state.counters.advice_computed.load(Relaxed),
        "advice_unavailable": state.counters.advice_unavailable.load(Relaxed),
        "calendars_served": state.counters.calendars_served.load(Relaxed),
        "predictions_served": state.counters.predictions_served.load(Relaxed),
    }))
}
