use crate::errors::AppError;
use crate::models::{EndedFastResponse, PageQuery, StartFastForm, StartFastRequest, TickQuery};
use crate::stages::{Stage, STAGES};
use crate::state::AppState;
use crate::tracker::{tick, ElapsedState, FastSession, RenderModel};
use crate::ui::{render_fasting, PageError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use std::collections::BTreeSet;
use tracing::{info, warn};

pub async fn index() -> Redirect {
    Redirect::to("/fasting")
}

pub async fn fasting_page(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let session = state.current().await;
    let model = session.map(|session| tick(&session, now_unix(), &state.config.marker_range()));
    let error = query.error.as_deref().and_then(PageError::from_code);
    Html(render_fasting(session.as_ref(), model.as_ref(), error))
}

pub async fn start_fast_form(
    State(state): State<AppState>,
    Form(form): Form<StartFastForm>,
) -> Result<Redirect, AppError> {
    let goal_hours = match parse_goal(&form.goal) {
        Ok(goal) => goal,
        Err(err) => {
            warn!("rejected goal {:?}: {}", form.goal, err.message);
            return redirect_on_error(err);
        }
    };

    let session = FastSession {
        start_time: now_unix(),
        goal_hours,
    };
    match begin_fast(&state, session).await {
        Ok(_) => Ok(Redirect::to("/fasting")),
        Err(err) => redirect_on_error(err),
    }
}

pub async fn end_fast_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    match finish_fast(&state, now_unix()).await {
        Ok(_) => Ok(Redirect::to("/fasting")),
        Err(err) => redirect_on_error(err),
    }
}

pub async fn get_fast(State(state): State<AppState>) -> Result<Json<FastSession>, AppError> {
    state
        .current()
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("No fast in progress"))
}

pub async fn start_fast(
    State(state): State<AppState>,
    Json(payload): Json<StartFastRequest>,
) -> Result<Json<FastSession>, AppError> {
    let session = FastSession {
        start_time: payload.start_time.unwrap_or_else(now_unix),
        goal_hours: payload.goal_hours.unwrap_or(0),
    };
    let session = begin_fast(&state, session).await?;
    Ok(Json(session))
}

pub async fn end_fast(State(state): State<AppState>) -> Result<Json<EndedFastResponse>, AppError> {
    let ended = finish_fast(&state, now_unix()).await?;
    Ok(Json(ended))
}

pub async fn get_tick(
    State(state): State<AppState>,
    Query(query): Query<TickQuery>,
) -> Result<Json<RenderModel>, AppError> {
    let marker_hours = parse_markers(query.markers.as_deref(), &state.config.marker_range())?;
    let session = state
        .current()
        .await
        .ok_or_else(|| AppError::not_found("No fast in progress"))?;

    Ok(Json(tick(&session, now_unix(), &marker_hours)))
}

pub async fn get_stages() -> Json<&'static [Stage]> {
    Json(STAGES)
}

async fn begin_fast(state: &AppState, session: FastSession) -> Result<FastSession, AppError> {
    let mut current = state.session.lock().await;
    if current.is_some() {
        warn!("start rejected, a fast is already in progress");
        return Err(AppError::conflict("A fast is already in progress"));
    }

    *current = Some(session);
    info!(
        start_time = session.start_time,
        goal_hours = session.goal_hours,
        "fast started"
    );
    Ok(session)
}

async fn finish_fast(state: &AppState, now: i64) -> Result<EndedFastResponse, AppError> {
    let mut current = state.session.lock().await;
    let Some(session) = current.take() else {
        warn!("end rejected, no fast in progress");
        return Err(AppError::not_found("No fast in progress"));
    };

    let elapsed = ElapsedState::between(session.start_time, now);
    let duration_hours = elapsed.elapsed_seconds as f64 / 3600.0;
    info!(duration_hours, "fast ended");

    Ok(EndedFastResponse {
        start_time: session.start_time,
        goal_hours: session.goal_hours,
        duration_hours,
    })
}

fn parse_goal(raw: &str) -> Result<u32, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .map_err(|_| AppError::bad_request("Goal must be a non-negative number"))
}

fn parse_markers(raw: Option<&str>, default: &[u32]) -> Result<Vec<u32>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(default.to_vec());
    };

    let hours = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| AppError::bad_request(format!("invalid marker hour '{}'", part.trim())))
        })
        .collect::<Result<BTreeSet<u32>, AppError>>()?;
    Ok(hours.into_iter().collect())
}

/// Known failures go back to the page as an error code; anything else surfaces as-is.
fn redirect_on_error(err: AppError) -> Result<Redirect, AppError> {
    let error = match err.status {
        StatusCode::BAD_REQUEST => PageError::InvalidGoal,
        StatusCode::CONFLICT => PageError::AlreadyRunning,
        StatusCode::NOT_FOUND => PageError::NoFast,
        _ => return Err(err),
    };
    Ok(Redirect::to(&format!("/fasting?error={}", error.code())))
}

fn now_unix() -> i64 {
    Local::now().timestamp()
}
