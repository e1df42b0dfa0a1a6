//! Appointment Kernel: an in-memory calendar with conflict-free booking.
//!
//! Appointments are filed by date. Every write goes through the same
//! half-open overlap predicate, so no two appointments on a date ever
//! overlap:
//!
//! - [`store`] holds appointments by date
//! - [`conflict`] decides whether an interval clashes with what is stored
//! - [`slots`] lists free business-hour intervals on a 30-minute grid
//! - [`booking`] validates and inserts caller requests
//! - [`calendar`] bundles a shared store with its business hours

pub mod appointment;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod conflict;
pub mod error;
pub mod slots;
pub mod store;

pub use appointment::{Appointment, AppointmentId, format_datetime, parse_date, parse_datetime};
pub use booking::{MeetingRequest, book};
pub use calendar::Calendar;
pub use config::{BusinessHours, ScheduleConfig};
pub use conflict::{TimeSpan, find_conflict, has_conflict, overlaps};
pub use error::{CalendarError, ConfigError, Result};
pub use slots::{OpenSlot, find_open_slots};
pub use store::{AppointmentStore, SharedStore};
