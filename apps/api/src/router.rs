use std::sync::Arc;

use axum::{routing::get, Router};

use scheduling_cell::router::scheduling_routes;
use scheduling_cell::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Appointment booking API is running!" }))
        .merge(scheduling_routes(state))
}
