// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn scheduling_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Registration; only registered patients and doctors are bookable
        .route("/patients", post(handlers::register_patient))
        .route("/patients/by-contact/{contact}", get(handlers::get_patient_by_contact))
        .route("/doctors", post(handlers::register_doctor))
        // Availability
        .route("/doctors/availability", get(handlers::doctor_availability))
        // Appointment lifecycle
        .route("/appointments", post(handlers::book_appointment))
        .route("/appointments/{appointment_id}", get(handlers::get_appointment))
        .route(
            "/appointments/{appointment_id}/reschedule",
            patch(handlers::reschedule_appointment),
        )
        .route(
            "/appointments/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        // Agent tool-call bridge
        .route("/tools", get(handlers::list_tools))
        .route("/tools/call", post(handlers::call_tool))
        .with_state(state)
}
