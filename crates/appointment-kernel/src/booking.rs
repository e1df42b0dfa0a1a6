//! Booking service: validate a meeting request and insert it.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::appointment::{Appointment, parse_datetime};
use crate::config::BusinessHours;
use crate::conflict::find_conflict;
use crate::error::{CalendarError, Result};
use crate::store::AppointmentStore;

/// A caller's request to put a meeting on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub title: String,
    /// `YYYY-MM-DD HH:MM`
    pub start_time: String,
    /// `YYYY-MM-DD HH:MM`
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl MeetingRequest {
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        description: impl Into<String>,
        attendees: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            description: description.into(),
            attendees,
        }
    }
}

/// Validate `request` and insert it under its start date.
///
/// Checks run in order and stop at the first failure: timestamp parsing,
/// start before end, business hours, conflicts. The store is only touched
/// once every check has passed.
///
/// The business-hours check compares whole hours only, so with a 17:00 close
/// a meeting ending at 17:30 is accepted.
pub fn book(
    store: &mut AppointmentStore,
    hours: &BusinessHours,
    request: &MeetingRequest,
) -> Result<Appointment> {
    let start = parse_datetime(&request.start_time)?;
    let end = parse_datetime(&request.end_time)?;

    if start >= end {
        return Err(CalendarError::invalid_input(
            "End time must be after start time.",
        ));
    }

    if start.hour() < hours.start_hour || end.hour() > hours.end_hour {
        debug!(start = %start, end = %end, "Meeting outside business hours");
        return Err(CalendarError::OutOfHours { hours: *hours });
    }

    let date = start.date();
    if let Some(existing) = find_conflict(store, date, start, end) {
        debug!(title = %request.title, clashes_with = %existing.title(), "Meeting conflicts");
        return Err(CalendarError::Conflict {
            title: existing.title().to_string(),
            start: existing.start_time(),
            end: existing.end_time(),
        });
    }

    let appointment = Appointment::new(
        request.title.clone(),
        start,
        end,
        request.description.clone(),
        request.attendees.clone(),
    )?;
    store.insert(date, appointment.clone());

    info!(
        title = %appointment.title(),
        date = %date,
        start = %start.format("%H:%M"),
        end = %end.format("%H:%M"),
        "Meeting booked"
    );

    Ok(appointment)
}
