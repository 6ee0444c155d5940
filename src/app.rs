use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/fasting", get(handlers::fasting_page))
        .route("/start_fast", post(handlers::start_fast_form))
        .route("/end_fast", post(handlers::end_fast_form))
        .route(
            "/api/fast",
            get(handlers::get_fast)
                .post(handlers::start_fast)
                .delete(handlers::end_fast),
        )
        .route("/api/tick", get(handlers::get_tick))
        .route("/api/stages", get(handlers::get_stages))
        .with_state(state)
}
