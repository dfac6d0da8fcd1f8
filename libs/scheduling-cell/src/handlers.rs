// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    AvailabilityQuery, BookAppointmentRequest, RegisterDoctorRequest, RegisterPatientRequest,
    RescheduleAppointmentRequest, SchedulingError,
};
use crate::services::availability;
use crate::services::booking::BookingService;
use crate::services::datetime;
use crate::services::store::ScheduleStore;
use crate::state::AppState;
use crate::tools;

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

fn scheduling_error_to_app_error(err: SchedulingError) -> AppError {
    match err {
        SchedulingError::UnrecognizedDate(input) => {
            AppError::BadRequest(format!("Unsupported date format: {}", input))
        }
        SchedulingError::PatientNotFound => AppError::NotFound("Patient not found".to_string()),
        SchedulingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        SchedulingError::AppointmentNotFound => {
            AppError::NotFound("Appointment not found".to_string())
        }
        SchedulingError::SlotUnavailable {
            doctor_id,
            appointment_date,
        } => AppError::Conflict(format!(
            "Doctor {} is not available at {}",
            doctor_id, appointment_date
        )),
        SchedulingError::Database(msg) => AppError::Database(msg),
    }
}

// ==============================================================================
// PATIENT AND DOCTOR REGISTRATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let store = ScheduleStore::new(state.pool.clone());

    let patient_id = store
        .find_or_create_patient(&request.name, request.age, &request.contact)
        .await
        .map_err(scheduling_error_to_app_error)?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "name": request.name,
    })))
}

#[axum::debug_handler]
pub async fn get_patient_by_contact(
    State(state): State<Arc<AppState>>,
    Path(contact): Path<String>,
) -> Result<Json<Value>, AppError> {
    let store = ScheduleStore::new(state.pool.clone());

    let (patient_id, name) = store
        .get_patient_by_contact(&contact)
        .await
        .map_err(scheduling_error_to_app_error)?
        .ok_or_else(|| {
            AppError::NotFound("Patient with this contact number not found".to_string())
        })?;

    Ok(Json(json!({
        "patient_id": patient_id,
        "name": name,
        "contact": contact,
    })))
}

#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let store = ScheduleStore::new(state.pool.clone());

    let doctor_id = store
        .find_or_create_doctor(&request.name, &request.specialization)
        .await
        .map_err(scheduling_error_to_app_error)?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "name": request.name,
        "specialization": request.specialization,
    })))
}

// ==============================================================================
// AVAILABILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn doctor_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let store = ScheduleStore::new(state.pool.clone());

    let doctor_id = store
        .get_doctor_id(&query.doctor_name, &query.specialization)
        .await
        .map_err(scheduling_error_to_app_error)?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    let slots = availability::available_slots(&store, &doctor_id, query.date)
        .await
        .map_err(scheduling_error_to_app_error)?;

    let rendered: Vec<String> = slots.into_iter().map(datetime::canonical).collect();

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date.format("%Y-%m-%d").to_string(),
        "available_slots": rendered,
    })))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(state.pool.clone());

    let _guard = state.write_guard.lock().await;
    let appointment = service
        .book_appointment(
            &request.patient_id,
            &request.doctor_name,
            &request.specialization,
            &request.appointment_date,
        )
        .await
        .map_err(scheduling_error_to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": format!(
            "Appointment scheduled successfully with ID {} on {}",
            appointment.appointment_id, appointment.appointment_date
        ),
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let store = ScheduleStore::new(state.pool.clone());

    let (appointment_date, doctor_id) = store
        .get_appointment(&appointment_id)
        .await
        .map_err(scheduling_error_to_app_error)?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    Ok(Json(json!({
        "appointment_id": appointment_id,
        "appointment_date": appointment_date,
        "doctor_id": doctor_id,
    })))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(state.pool.clone());

    let _guard = state.write_guard.lock().await;
    let rescheduled = service
        .reschedule_appointment(&appointment_id, &request.new_appointment_date)
        .await
        .map_err(scheduling_error_to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": rescheduled,
        "message": format!(
            "Appointment {} has been successfully rescheduled to {}",
            rescheduled.appointment_id, rescheduled.appointment_date
        ),
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(state.pool.clone());

    let _guard = state.write_guard.lock().await;
    service
        .cancel_appointment(&appointment_id)
        .await
        .map_err(scheduling_error_to_app_error)?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Appointment {} has been successfully canceled", appointment_id),
    })))
}

// ==============================================================================
// TOOL-CALL HANDLERS
// ==============================================================================

/// Tool declarations the agent session registers at setup.
#[axum::debug_handler]
pub async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": tools::tool_definitions() }))
}

/// The agent bridge posts tool calls here and relays the result string back
/// to the conversation verbatim.
#[axum::debug_handler]
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToolCallRequest>,
) -> Json<Value> {
    let result = tools::dispatch_tool_call(&state, &request.name, request.arguments).await;
    Json(json!({ "result": result }))
}
