use serde_json::json;

use scheduling_cell::services::store::ScheduleStore;
use scheduling_cell::state::AppState;
use scheduling_cell::tools;
use shared_database::{connect_with_settings, init_schema};

async fn test_state() -> AppState {
    let pool = connect_with_settings("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory pool");
    init_schema(&pool).await.expect("schema init");
    AppState::new(pool)
}

async fn seed_patient_and_doctor(state: &AppState) -> String {
    let store = ScheduleStore::new(state.pool.clone());
    let patient_id = store
        .find_or_create_patient("John Doe", 30, "1234567890")
        .await
        .expect("register patient");
    store
        .find_or_create_doctor("Dr. Smith", "Cardiology")
        .await
        .expect("register doctor");
    patient_id
}

fn extract_appointment_id(message: &str) -> String {
    // "Appointment scheduled successfully with ID XXXXXXXX for ..."
    message
        .split("ID ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("appointment id in message")
        .to_string()
}

#[tokio::test]
async fn book_tool_returns_a_confirmation_message() {
    let state = test_state().await;
    let patient_id = seed_patient_and_doctor(&state).await;

    let result = tools::dispatch_tool_call(
        &state,
        "book_appointment",
        json!({
            "patient_id": patient_id,
            "doctor_name": "Dr. Smith",
            "specialization": "Cardiology",
            "appointment_date": "2025-01-16 10:00:00",
        }),
    )
    .await;

    assert!(result.contains("Appointment scheduled successfully"));
    assert!(result.contains("2025-01-16 10:00:00"));
}

#[tokio::test]
async fn book_tool_reports_conflicts_as_text() {
    let state = test_state().await;
    let patient_id = seed_patient_and_doctor(&state).await;

    let arguments = json!({
        "patient_id": patient_id,
        "doctor_name": "Dr. Smith",
        "specialization": "Cardiology",
        "appointment_date": "2025-01-16 10:00:00",
    });

    let first = tools::dispatch_tool_call(&state, "book_appointment", arguments.clone()).await;
    assert!(first.contains("scheduled successfully"));

    let second = tools::dispatch_tool_call(&state, "book_appointment", arguments).await;
    assert!(second.contains("is not available at 2025-01-16 10:00:00"));
}

#[tokio::test]
async fn book_tool_reports_unsupported_dates_as_text() {
    let state = test_state().await;
    let patient_id = seed_patient_and_doctor(&state).await;

    let result = tools::dispatch_tool_call(
        &state,
        "book_appointment",
        json!({
            "patient_id": patient_id,
            "doctor_name": "Dr. Smith",
            "specialization": "Cardiology",
            "appointment_date": "whenever works",
        }),
    )
    .await;

    assert!(result.contains("whenever works is not a supported date format"));
}

#[tokio::test]
async fn update_and_cancel_tools_complete_the_lifecycle() {
    let state = test_state().await;
    let patient_id = seed_patient_and_doctor(&state).await;

    let booked = tools::dispatch_tool_call(
        &state,
        "book_appointment",
        json!({
            "patient_id": patient_id,
            "doctor_name": "Dr. Smith",
            "specialization": "Cardiology",
            "appointment_date": "2025-01-16 10:00:00",
        }),
    )
    .await;
    let appointment_id = extract_appointment_id(&booked);

    let updated = tools::dispatch_tool_call(
        &state,
        "update_appointment",
        json!({
            "appointment_id": appointment_id,
            "new_appointment_date": "2025-01-16 11:00:00",
        }),
    )
    .await;
    assert!(updated.contains("successfully rescheduled to 2025-01-16 11:00:00"));

    let cancelled = tools::dispatch_tool_call(
        &state,
        "cancel_appointment",
        json!({ "appointment_id": appointment_id }),
    )
    .await;
    assert!(cancelled.contains("successfully canceled"));

    let again = tools::dispatch_tool_call(
        &state,
        "cancel_appointment",
        json!({ "appointment_id": appointment_id }),
    )
    .await;
    assert_eq!(again, "No appointment found with this ID.");
}

#[tokio::test]
async fn missing_arguments_and_unknown_tools_become_messages() {
    let state = test_state().await;

    let missing = tools::dispatch_tool_call(&state, "book_appointment", json!({})).await;
    assert_eq!(missing, "Missing required argument: patient_id");

    let unknown = tools::dispatch_tool_call(&state, "order_lunch", json!({})).await;
    assert_eq!(unknown, "Unknown tool: order_lunch");
}

#[tokio::test]
async fn tool_definitions_match_the_dispatchable_names() {
    let definitions = tools::tool_definitions();
    assert_eq!(definitions.len(), 3);

    for definition in &definitions {
        assert_eq!(definition["type"], json!("function"));
        assert!(definition["parameters"]["required"].is_array());
    }
}
