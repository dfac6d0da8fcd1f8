// libs/scheduling-cell/src/tools.rs
//
// The fixed function contract the conversational agent drives. Results are
// single human-readable strings the agent bridge relays back verbatim; no
// error here ever propagates as a fault.
use serde_json::{json, Value};
use tracing::debug;

use crate::models::SchedulingError;
use crate::services::booking::BookingService;
use crate::state::AppState;

/// JSON-schema declarations for the agent session's tool registry.
pub fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "type": "function",
            "name": "book_appointment",
            "description": "Schedule a new appointment for a patient.",
            "parameters": {
                "type": "object",
                "properties": {
                    "patient_id": {
                        "type": "string",
                        "description": "The identifier of the registered patient."
                    },
                    "doctor_name": {
                        "type": "string",
                        "description": "The name of the doctor with whom the appointment is being booked."
                    },
                    "specialization": {
                        "type": "string",
                        "description": "The department or specialty for the appointment (e.g., Cardiology, Orthopedics)."
                    },
                    "appointment_date": {
                        "type": "string",
                        "description": "The date and time of the appointment."
                    }
                },
                "required": ["patient_id", "doctor_name", "specialization", "appointment_date"]
            }
        }),
        json!({
            "type": "function",
            "name": "update_appointment",
            "description": "Move an existing appointment to a new date and time.",
            "parameters": {
                "type": "object",
                "properties": {
                    "appointment_id": {
                        "type": "string",
                        "description": "The unique identifier of the appointment to be updated."
                    },
                    "new_appointment_date": {
                        "type": "string",
                        "description": "The new date and time for the appointment."
                    }
                },
                "required": ["appointment_id", "new_appointment_date"]
            }
        }),
        json!({
            "type": "function",
            "name": "cancel_appointment",
            "description": "Cancel an existing appointment for a patient.",
            "parameters": {
                "type": "object",
                "properties": {
                    "appointment_id": {
                        "type": "string",
                        "description": "The unique identifier of the appointment to be canceled."
                    }
                },
                "required": ["appointment_id"]
            }
        }),
    ]
}

fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, String> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Missing required argument: {}", key))
}

fn scheduling_error_message(err: SchedulingError) -> String {
    match err {
        SchedulingError::UnrecognizedDate(input) => {
            format!(
                "{} is not a supported date format. Use 'YYYY-MM-DD HH:MM:SS'.",
                input
            )
        }
        SchedulingError::PatientNotFound => "Patient with this ID was not found.".to_string(),
        SchedulingError::DoctorNotFound => {
            "Doctor with this name and specialization was not found.".to_string()
        }
        SchedulingError::AppointmentNotFound => "No appointment found with this ID.".to_string(),
        SchedulingError::SlotUnavailable {
            doctor_id,
            appointment_date,
        } => format!(
            "Doctor with ID {} is not available at {}.",
            doctor_id, appointment_date
        ),
        SchedulingError::Database(msg) => format!("Failed to complete the operation: {}", msg),
    }
}

/// Dispatch one tool call by name and render the outcome as a message
/// string. Write operations run under the shared write guard.
pub async fn dispatch_tool_call(state: &AppState, name: &str, arguments: Value) -> String {
    debug!("Dispatching tool call {} with {}", name, arguments);

    let service = BookingService::new(state.pool.clone());
    let _guard = state.write_guard.lock().await;

    match name {
        "book_appointment" => {
            let parsed = (|| {
                Ok::<_, String>((
                    required_str(&arguments, "patient_id")?,
                    required_str(&arguments, "doctor_name")?,
                    required_str(&arguments, "specialization")?,
                    required_str(&arguments, "appointment_date")?,
                ))
            })();
            let (patient_id, doctor_name, specialization, appointment_date) = match parsed {
                Ok(args) => args,
                Err(message) => return message,
            };

            match service
                .book_appointment(patient_id, doctor_name, specialization, appointment_date)
                .await
            {
                Ok(appointment) => format!(
                    "Appointment scheduled successfully with ID {} for Patient ID {} with Doctor ID {} on {}.",
                    appointment.appointment_id,
                    appointment.patient_id,
                    appointment.doctor_id,
                    appointment.appointment_date
                ),
                Err(err) => scheduling_error_message(err),
            }
        }

        "update_appointment" => {
            let appointment_id = match required_str(&arguments, "appointment_id") {
                Ok(value) => value,
                Err(message) => return message,
            };
            let new_appointment_date = match required_str(&arguments, "new_appointment_date") {
                Ok(value) => value,
                Err(message) => return message,
            };

            match service
                .reschedule_appointment(appointment_id, new_appointment_date)
                .await
            {
                Ok(rescheduled) => format!(
                    "Appointment {} has been successfully rescheduled to {}.",
                    rescheduled.appointment_id, rescheduled.appointment_date
                ),
                Err(err) => scheduling_error_message(err),
            }
        }

        "cancel_appointment" => {
            let appointment_id = match required_str(&arguments, "appointment_id") {
                Ok(value) => value,
                Err(message) => return message,
            };

            match service.cancel_appointment(appointment_id).await {
                Ok(()) => format!(
                    "Appointment {} has been successfully canceled.",
                    appointment_id
                ),
                Err(err) => scheduling_error_message(err),
            }
        }

        other => format!("Unknown tool: {}", other),
    }
}
