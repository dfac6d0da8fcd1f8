// libs/scheduling-cell/src/services/store.rs
use chrono::NaiveDate;
use sqlx::Row;
use tracing::debug;

use shared_database::DbPool;

use crate::models::SchedulingError;
use crate::services::ids;

/// Owns the patient, doctor and appointment tables. Every method runs a
/// single statement against the pool, so each write is its own transaction
/// and no partial state is observable between calls.
pub struct ScheduleStore {
    pool: DbPool,
}

impl ScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Comparison key for doctor names: lowercased, with a leading "Dr."
    /// honorific removed. Stored names keep their original form; only
    /// lookups normalize.
    pub fn normalize_doctor_name(name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        let stripped = lowered
            .strip_prefix("dr.")
            .or_else(|| lowered.strip_prefix("dr "))
            .unwrap_or(&lowered);
        stripped.trim().to_string()
    }

    /// Generate an identifier that is not yet present in the given column.
    /// Collisions in the 36^8 space are rare, so the loop almost always
    /// finishes on the first pass.
    async fn fresh_id(&self, table: &str, column: &str) -> Result<String, SchedulingError> {
        loop {
            let candidate = ids::generate();
            let query = format!("SELECT 1 FROM {table} WHERE {column} = ?");
            let taken = sqlx::query(&query)
                .bind(&candidate)
                .fetch_optional(&self.pool)
                .await?;
            if taken.is_none() {
                return Ok(candidate);
            }
        }
    }

    pub async fn fresh_appointment_id(&self) -> Result<String, SchedulingError> {
        self.fresh_id("appointments", "appointment_id").await
    }

    // ==========================================================================
    // PATIENTS
    // ==========================================================================

    /// Look up by the (name, contact) dedup key; create the row with a fresh
    /// identifier when absent.
    pub async fn find_or_create_patient(
        &self,
        name: &str,
        age: i64,
        contact: &str,
    ) -> Result<String, SchedulingError> {
        let existing = sqlx::query("SELECT patient_id FROM patients WHERE name = ? AND contact = ?")
            .bind(name)
            .bind(contact)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = existing {
            return Ok(row.get("patient_id"));
        }

        let patient_id = self.fresh_id("patients", "patient_id").await?;
        sqlx::query("INSERT INTO patients (patient_id, name, age, contact) VALUES (?, ?, ?, ?)")
            .bind(&patient_id)
            .bind(name)
            .bind(age)
            .bind(contact)
            .execute(&self.pool)
            .await?;

        debug!("Registered patient {} with id {}", name, patient_id);
        Ok(patient_id)
    }

    pub async fn get_patient_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<(String, String)>, SchedulingError> {
        let row = sqlx::query("SELECT patient_id, name FROM patients WHERE contact = ?")
            .bind(contact)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| (row.get("patient_id"), row.get("name"))))
    }

    pub async fn patient_exists(&self, patient_id: &str) -> Result<bool, SchedulingError> {
        let row = sqlx::query("SELECT 1 FROM patients WHERE patient_id = ?")
            .bind(patient_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    // ==========================================================================
    // DOCTORS
    // ==========================================================================

    /// Look up by the (normalized name, specialization) dedup key; create the
    /// row with a fresh identifier when absent. "Dr. Smith" and "Smith"
    /// resolve to the same record.
    pub async fn find_or_create_doctor(
        &self,
        name: &str,
        specialization: &str,
    ) -> Result<String, SchedulingError> {
        if let Some(doctor_id) = self.get_doctor_id(name, specialization).await? {
            return Ok(doctor_id);
        }

        let doctor_id = self.fresh_id("doctors", "doctor_id").await?;
        sqlx::query("INSERT INTO doctors (doctor_id, name, specialization) VALUES (?, ?, ?)")
            .bind(&doctor_id)
            .bind(name)
            .bind(specialization)
            .execute(&self.pool)
            .await?;

        debug!("Registered doctor {} with id {}", name, doctor_id);
        Ok(doctor_id)
    }

    pub async fn get_doctor_id(
        &self,
        name: &str,
        specialization: &str,
    ) -> Result<Option<String>, SchedulingError> {
        let wanted = Self::normalize_doctor_name(name);

        let rows = sqlx::query("SELECT doctor_id, name FROM doctors WHERE specialization = ?")
            .bind(specialization)
            .fetch_all(&self.pool)
            .await?;

        for row in rows {
            let stored: String = row.get("name");
            if Self::normalize_doctor_name(&stored) == wanted {
                return Ok(Some(row.get("doctor_id")));
            }
        }

        Ok(None)
    }

    // ==========================================================================
    // APPOINTMENTS
    // ==========================================================================

    /// Date-time and doctor id for an appointment, when it exists.
    pub async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Option<(String, String)>, SchedulingError> {
        let row = sqlx::query(
            "SELECT appointment_date, doctor_id FROM appointments WHERE appointment_id = ?",
        )
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| (row.get("appointment_date"), row.get("doctor_id"))))
    }

    /// Number of appointments already held by the doctor at this exact
    /// canonical date-time. 0 or 1 under the schema constraint.
    pub async fn count_conflicts(
        &self,
        doctor_id: &str,
        appointment_date: &str,
    ) -> Result<i64, SchedulingError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS conflicts
             FROM appointments
             WHERE doctor_id = ? AND appointment_date = ?",
        )
        .bind(doctor_id)
        .bind(appointment_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("conflicts"))
    }

    /// Canonical date-times booked for a doctor on a calendar day, by exact
    /// date-prefix match.
    pub async fn booked_times_on(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<String>, SchedulingError> {
        let prefix = format!("{}%", date.format("%Y-%m-%d"));
        let rows = sqlx::query(
            "SELECT appointment_date FROM appointments
             WHERE doctor_id = ? AND appointment_date LIKE ?",
        )
        .bind(doctor_id)
        .bind(&prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.get("appointment_date"))
            .collect())
    }

    pub async fn insert_appointment(
        &self,
        appointment_id: &str,
        patient_id: &str,
        doctor_id: &str,
        appointment_date: &str,
    ) -> Result<(), SchedulingError> {
        sqlx::query(
            "INSERT INTO appointments (appointment_id, patient_id, doctor_id, appointment_date)
             VALUES (?, ?, ?, ?)",
        )
        .bind(appointment_id)
        .bind(patient_id)
        .bind(doctor_id)
        .bind(appointment_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_appointment_date(
        &self,
        appointment_id: &str,
        doctor_id: &str,
        new_appointment_date: &str,
    ) -> Result<(), SchedulingError> {
        sqlx::query(
            "UPDATE appointments
             SET appointment_date = ?
             WHERE appointment_id = ? AND doctor_id = ?",
        )
        .bind(new_appointment_date)
        .bind(appointment_id)
        .bind(doctor_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns false when the identifier did not exist.
    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<bool, SchedulingError> {
        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = ?")
            .bind(appointment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
