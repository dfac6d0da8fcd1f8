// libs/scheduling-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==============================================================================
// CORE SCHEDULE MODELS
// ==============================================================================

/// A patient row. Identifiers are short generated strings, not row numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub age: i64,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub specialization: String,
}

/// An appointment row. `appointment_date` is always the canonical
/// `YYYY-MM-DD HH:MM:SS` form; the row's presence is the booking state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub age: i64,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub appointment_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub new_appointment_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_name: String,
    pub specialization: String,
    pub date: NaiveDate,
}

// ==============================================================================
// OUTCOME MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RescheduledAppointment {
    pub appointment_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulingError {
    #[error("unsupported date format: {0}")]
    UnrecognizedDate(String),

    #[error("patient not found")]
    PatientNotFound,

    #[error("doctor not found")]
    DoctorNotFound,

    #[error("appointment not found")]
    AppointmentNotFound,

    #[error("doctor {doctor_id} is not available at {appointment_date}")]
    SlotUnavailable {
        doctor_id: String,
        appointment_date: String,
    },

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for SchedulingError {
    fn from(err: sqlx::Error) -> Self {
        SchedulingError::Database(err.to_string())
    }
}
