//! Appointment: the immutable calendar entry.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CalendarError, Result};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for appointment timestamps (minute precision).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Namespace UUID for deterministic appointment IDs (v5).
const APPOINTMENT_NAMESPACE: Uuid = Uuid::from_bytes([
    0x3f, 0x5d, 0x1c, 0x82, 0x6a, 0x0e, 0x4b, 0x71, 0x9c, 0x2d, 0xe4, 0x08, 0x57, 0xb3, 0x6f, 0x19,
]);

/// Stable identifier for a stored appointment.
pub type AppointmentId = Uuid;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CalendarError::invalid_input("Invalid date format. Please use YYYY-MM-DD format.")
    })
}

/// Parse a `YYYY-MM-DD HH:MM` timestamp.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        CalendarError::invalid_input(
            "Invalid datetime format. Please use YYYY-MM-DD HH:MM format.",
        )
    })
}

/// Format a timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub(crate) mod minute_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::DATETIME_FORMAT))
    }
}

/// A calendar appointment.
///
/// Appointments never change after construction; the store only inserts and
/// removes whole values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    #[serde(skip)]
    id: AppointmentId,
    title: String,
    #[serde(with = "minute_format")]
    start_time: NaiveDateTime,
    #[serde(with = "minute_format")]
    end_time: NaiveDateTime,
    description: String,
    attendees: Vec<String>,
}

impl Appointment {
    /// Create an appointment. Fails unless `start_time < end_time`.
    pub fn new(
        title: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        description: impl Into<String>,
        attendees: Vec<String>,
    ) -> Result<Self> {
        if start_time >= end_time {
            return Err(CalendarError::invalid_input(
                "End time must be after start time.",
            ));
        }

        let title = title.into();
        let key = format!(
            "{}|{}|{}",
            format_datetime(&start_time),
            format_datetime(&end_time),
            title
        );

        Ok(Self {
            id: Uuid::new_v5(&APPOINTMENT_NAMESPACE, key.as_bytes()),
            title,
            start_time,
            end_time,
            description: description.into(),
            attendees,
        })
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    /// The date this appointment is filed under.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}
