//! Caller-facing calendar operations.
//!
//! These four operations are the whole contract an agent layer depends on.
//! Results are plain serializable records with `YYYY-MM-DD HH:MM`
//! timestamps; failures come back as `{"error": message}` rather than as
//! faults.

use chrono::{Local, NaiveDate, TimeDelta};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use appointment_kernel::{Appointment, Calendar, CalendarError, MeetingRequest, OpenSlot};

use crate::generator::{GeneratedSchedule, RandomScheduleGenerator};

/// Meeting length used when the caller does not give one.
pub const DEFAULT_MEETING_MINUTES: i64 = 60;

/// Days past today covered by the start-up calendar.
pub const SEED_HORIZON_DAYS: i64 = 30;

/// Structured failure returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    pub error: String,
}

/// Either the operation's result or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse<T> {
    Ok(T),
    Error(ToolError),
}

impl<T> ToolResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Error(e) => Some(&e.error),
        }
    }
}

impl<T> From<Result<T, CalendarError>> for ToolResponse<T> {
    fn from(result: Result<T, CalendarError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Error(ToolError {
                error: e.to_string(),
            }),
        }
    }
}

/// Successful `set_meeting` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingBooked {
    pub success: bool,
    pub message: String,
    pub appointment: Appointment,
}

/// The calendar operations exposed to an agent.
#[derive(Debug, Clone, Default)]
pub struct CalendarTools {
    calendar: Calendar,
}

impl CalendarTools {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Replace the calendar with a freshly generated one covering today
    /// through `SEED_HORIZON_DAYS` days ahead.
    pub fn seed_calendar<R: Rng>(
        &self,
        generator: &mut RandomScheduleGenerator<R>,
        today: NaiveDate,
    ) -> GeneratedSchedule {
        let end = today + TimeDelta::days(SEED_HORIZON_DAYS);
        info!(start = %today, %end, "Generating calendar");

        self.calendar.clear();
        generator.generate(&self.calendar, today, end, true)
    }

    /// Seed the calendar from `today`, then generate `[start, end]` over it.
    ///
    /// With `keep_existing`, the new meetings are placed around the seeded
    /// ones; otherwise the range is replaced.
    pub fn generate_over_seeded<R: Rng>(
        &self,
        generator: &mut RandomScheduleGenerator<R>,
        today: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
        keep_existing: bool,
    ) -> GeneratedSchedule {
        let seeded = self.seed_calendar(generator, today);
        info!(
            days = seeded.day_count(),
            meetings = seeded.total_meetings(),
            "Calendar data generated"
        );
        generator.generate(&self.calendar, start, end, !keep_existing)
    }

    /// Appointments for tomorrow by the local clock.
    pub fn get_tomorrow_appointments(&self) -> Vec<Appointment> {
        self.appointments_after(Local::now().date_naive())
    }

    /// Appointments on the day after `today`.
    pub fn appointments_after(&self, today: NaiveDate) -> Vec<Appointment> {
        today
            .succ_opt()
            .map(|tomorrow| self.calendar.appointments_on(tomorrow))
            .unwrap_or_default()
    }

    /// Every stored appointment, grouped by date.
    pub fn get_all_appointments(&self) -> Vec<Vec<Appointment>> {
        self.calendar.all_appointments()
    }

    /// Free slots on `date` (`YYYY-MM-DD`) for a meeting of
    /// `duration_minutes`, defaulting to an hour.
    pub fn get_open_meeting_slots(
        &self,
        date: &str,
        duration_minutes: Option<i64>,
    ) -> ToolResponse<Vec<OpenSlot>> {
        let duration = duration_minutes.unwrap_or(DEFAULT_MEETING_MINUTES);
        self.calendar.open_slots(date, duration).into()
    }

    /// Book a meeting.
    pub fn set_meeting(&self, request: &MeetingRequest) -> ToolResponse<MeetingBooked> {
        self.calendar
            .book(request)
            .map(|appointment| MeetingBooked {
                success: true,
                message: format!(
                    "Meeting '{}' scheduled successfully for {} - {}",
                    appointment.title(),
                    request.start_time,
                    request.end_time
                ),
                appointment,
            })
            .into()
    }
}
