//! Calendar Tools - demo calendars and the operations an agent calls.
//!
//! Builds on `appointment-kernel`:
//!
//! - [`generator`] fills a date range with random, non-overlapping meetings
//! - [`tools`] exposes the four caller-facing operations (tomorrow's
//!   appointments, all appointments, open slots, booking) as serializable
//!   results

pub mod catalog;
pub mod generator;
pub mod tools;

pub use generator::{GeneratedSchedule, RandomScheduleGenerator, ScheduleDensity};
pub use tools::{CalendarTools, MeetingBooked, ToolError, ToolResponse};
