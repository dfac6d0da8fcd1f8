// libs/scheduling-cell/src/services/availability.rs
use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::SchedulingError;
use crate::services::datetime;
use crate::services::store::ScheduleStore;

pub const WORK_START_HOUR: u32 = 9;
pub const WORK_END_HOUR: u32 = 17;
pub const LUNCH_START_HOUR: u32 = 12;
pub const LUNCH_END_HOUR: u32 = 13;

/// Open 1-hour slots for a doctor on a date: working hours minus the lunch
/// interval minus already-booked times. Recomputed from the store on every
/// call, so a booking is reflected by the next query.
pub async fn available_slots(
    store: &ScheduleStore,
    doctor_id: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveDateTime>, SchedulingError> {
    let booked: HashSet<NaiveDateTime> = store
        .booked_times_on(doctor_id, date)
        .await?
        .iter()
        .filter_map(|stored| datetime::normalize(stored))
        .collect();

    let work_start = date
        .and_hms_opt(WORK_START_HOUR, 0, 0)
        .expect("work start is a valid time of day");
    let work_end = date
        .and_hms_opt(WORK_END_HOUR, 0, 0)
        .expect("work end is a valid time of day");
    let lunch_start = date
        .and_hms_opt(LUNCH_START_HOUR, 0, 0)
        .expect("lunch start is a valid time of day");
    let lunch_end = date
        .and_hms_opt(LUNCH_END_HOUR, 0, 0)
        .expect("lunch end is a valid time of day");

    let mut slots = Vec::new();
    let mut current = work_start;

    while current < work_end {
        if current >= lunch_start && current < lunch_end {
            current = lunch_end;
            continue;
        }

        if !booked.contains(&current) {
            slots.push(current);
        }

        current = current + Duration::hours(1);
    }

    debug!(
        "Doctor {} has {} open slots on {} ({} booked)",
        doctor_id,
        slots.len(),
        date,
        booked.len()
    );

    Ok(slots)
}
