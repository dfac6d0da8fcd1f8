// libs/scheduling-cell/src/services/booking.rs
use tracing::{debug, info, warn};

use shared_database::DbPool;

use crate::models::{Appointment, RescheduledAppointment, SchedulingError};
use crate::services::availability;
use crate::services::datetime;
use crate::services::store::ScheduleStore;

/// Orchestrates book, reschedule and cancel against the schedule store.
/// Holds no state between calls; every operation re-reads from the store.
///
/// The check-then-act windows here assume the caller serializes write
/// operations; see `AppState::write_guard`.
pub struct BookingService {
    store: ScheduleStore,
}

impl BookingService {
    pub fn new(pool: DbPool) -> Self {
        Self {
            store: ScheduleStore::new(pool),
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Book a new appointment. The patient and doctor must already exist as
    /// registered rows; booking never creates either side implicitly.
    pub async fn book_appointment(
        &self,
        patient_id: &str,
        doctor_name: &str,
        specialization: &str,
        appointment_date: &str,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            "Booking appointment for patient {} with doctor {} ({})",
            patient_id, doctor_name, specialization
        );

        let normalized = datetime::normalize_to_canonical(appointment_date)
            .ok_or_else(|| SchedulingError::UnrecognizedDate(appointment_date.to_string()))?;

        if !self.store.patient_exists(patient_id).await? {
            return Err(SchedulingError::PatientNotFound);
        }

        let doctor_id = self
            .store
            .get_doctor_id(doctor_name, specialization)
            .await?
            .ok_or(SchedulingError::DoctorNotFound)?;

        if self.store.count_conflicts(&doctor_id, &normalized).await? > 0 {
            warn!("Slot conflict for doctor {} at {}", doctor_id, normalized);
            return Err(SchedulingError::SlotUnavailable {
                doctor_id,
                appointment_date: normalized,
            });
        }

        let appointment_id = self.store.fresh_appointment_id().await?;
        self.store
            .insert_appointment(&appointment_id, patient_id, &doctor_id, &normalized)
            .await?;

        info!(
            "Appointment {} booked for patient {} with doctor {} at {}",
            appointment_id, patient_id, doctor_id, normalized
        );

        Ok(Appointment {
            appointment_id,
            patient_id: patient_id.to_string(),
            doctor_id,
            appointment_date: normalized,
        })
    }

    /// Move an existing appointment to a new date-time. The new time must be
    /// one of the doctor's open slots on that day; doctor and patient are
    /// unchanged and the appointment keeps its identifier.
    pub async fn reschedule_appointment(
        &self,
        appointment_id: &str,
        new_appointment_date: &str,
    ) -> Result<RescheduledAppointment, SchedulingError> {
        debug!("Rescheduling appointment {}", appointment_id);

        let (current_date, doctor_id) = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(SchedulingError::AppointmentNotFound)?;

        let normalized = datetime::normalize(new_appointment_date)
            .ok_or_else(|| SchedulingError::UnrecognizedDate(new_appointment_date.to_string()))?;

        let open_slots =
            availability::available_slots(&self.store, &doctor_id, normalized.date()).await?;
        if !open_slots.contains(&normalized) {
            warn!(
                "Doctor {} has no open slot at {}",
                doctor_id,
                datetime::canonical(normalized)
            );
            return Err(SchedulingError::SlotUnavailable {
                doctor_id,
                appointment_date: datetime::canonical(normalized),
            });
        }

        let canonical = datetime::canonical(normalized);
        self.store
            .update_appointment_date(appointment_id, &doctor_id, &canonical)
            .await?;

        info!(
            "Appointment {} rescheduled from {} to {}",
            appointment_id, current_date, canonical
        );

        Ok(RescheduledAppointment {
            appointment_id: appointment_id.to_string(),
            doctor_id,
            appointment_date: canonical,
        })
    }

    /// Remove an appointment. A second cancel of the same identifier fails
    /// with `AppointmentNotFound`, which is the expected terminal behavior.
    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<(), SchedulingError> {
        debug!("Cancelling appointment {}", appointment_id);

        let removed = self.store.delete_appointment(appointment_id).await?;
        if !removed {
            return Err(SchedulingError::AppointmentNotFound);
        }

        info!("Appointment {} cancelled", appointment_id);
        Ok(())
    }
}
