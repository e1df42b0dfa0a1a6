//! Slot finding: free business-hour intervals on a 30-minute grid.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::appointment::minute_format;
use crate::config::BusinessHours;
use crate::conflict::{TimeSpan, has_conflict};
use crate::error::{CalendarError, Result};
use crate::store::AppointmentStore;

/// Distance between consecutive candidate start times.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// A free interval. Serializes as `{start_time, end_time}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenSlot {
    #[serde(rename = "start_time", with = "minute_format")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_time", with = "minute_format")]
    pub end: NaiveDateTime,
}

impl TimeSpan for OpenSlot {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Candidate start times on `date`: every 30 minutes from opening while a
/// meeting of `duration` still ends by closing.
pub fn candidate_starts(
    hours: &BusinessHours,
    date: NaiveDate,
    duration: TimeDelta,
) -> impl Iterator<Item = NaiveDateTime> {
    let closing = hours.closing(date);
    let step = TimeDelta::minutes(SLOT_STEP_MINUTES);

    std::iter::successors(Some(hours.opening(date)), move |start| start.checked_add_signed(step))
        .take_while(move |start| {
            start
                .checked_add_signed(duration)
                .is_some_and(|end| end <= closing)
        })
}

/// Free slots of `duration_minutes` on `date`, in chronological order.
///
/// A duration longer than the business window yields no slots rather than an
/// error, however large it is.
pub fn find_open_slots(
    store: &AppointmentStore,
    hours: &BusinessHours,
    date: NaiveDate,
    duration_minutes: i64,
) -> Result<Vec<OpenSlot>> {
    if duration_minutes <= 0 {
        return Err(CalendarError::invalid_input(format!(
            "Meeting duration must be a positive number of minutes (got {}).",
            duration_minutes
        )));
    }

    if duration_minutes > hours.window_minutes() {
        return Ok(Vec::new());
    }

    let duration = TimeDelta::minutes(duration_minutes);
    let slots = candidate_starts(hours, date, duration)
        .map(|start| OpenSlot {
            start,
            end: start + duration,
        })
        .filter(|slot| !has_conflict(store, date, slot.start, slot.end))
        .collect();

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{Appointment, parse_datetime};
    use crate::conflict::overlaps;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn book(store: &mut AppointmentStore, start: &str, end: &str) {
        let appointment = Appointment::new(
            "Busy",
            parse_datetime(start).unwrap(),
            parse_datetime(end).unwrap(),
            "",
            vec![],
        )
        .unwrap();
        store.insert(appointment.date(), appointment);
    }

    fn clock(slot: &OpenSlot) -> String {
        slot.start.format("%H:%M").to_string()
    }

    #[test]
    fn test_empty_day_hour_slots() {
        let store = AppointmentStore::new();
        let slots = find_open_slots(&store, &BusinessHours::default(), monday(), 60).unwrap();

        assert_eq!(slots.len(), 15);
        assert_eq!(clock(&slots[0]), "09:00");
        assert_eq!(clock(&slots[14]), "16:00");
        assert_eq!(slots[14].end.format("%H:%M").to_string(), "17:00");
    }

    #[test]
    fn test_slots_skip_booked_interval() {
        let mut store = AppointmentStore::new();
        book(&mut store, "2024-01-08 10:00", "2024-01-08 11:00");

        let slots = find_open_slots(&store, &BusinessHours::default(), monday(), 60).unwrap();
        let starts: Vec<String> = slots.iter().map(clock).collect();

        // 09:30 and 10:30 overlap the booking; 09:00 and 11:00 touch it.
        assert!(starts.contains(&"09:00".to_string()));
        assert!(!starts.contains(&"09:30".to_string()));
        assert!(!starts.contains(&"10:00".to_string()));
        assert!(!starts.contains(&"10:30".to_string()));
        assert!(starts.contains(&"11:00".to_string()));
        assert_eq!(slots.len(), 12);
    }

    #[test]
    fn test_slots_are_ordered_and_conflict_free() {
        let mut store = AppointmentStore::new();
        book(&mut store, "2024-01-08 09:30", "2024-01-08 10:00");
        book(&mut store, "2024-01-08 13:00", "2024-01-08 14:30");

        let slots = find_open_slots(&store, &BusinessHours::default(), monday(), 45).unwrap();
        assert!(slots.windows(2).all(|pair| pair[0].start <= pair[1].start));
        for slot in &slots {
            assert!(store.get(monday()).iter().all(|a| !overlaps(slot.start, slot.end, a)));
        }
    }

    #[test]
    fn test_non_positive_duration_is_invalid() {
        let store = AppointmentStore::new();
        for duration in [0, -30] {
            let err = find_open_slots(&store, &BusinessHours::default(), monday(), duration)
                .unwrap_err();
            assert!(matches!(err, CalendarError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_duration_longer_than_window_is_empty() {
        let store = AppointmentStore::new();
        let slots = find_open_slots(&store, &BusinessHours::default(), monday(), 481).unwrap();
        assert!(slots.is_empty());

        let whole_day = find_open_slots(&store, &BusinessHours::default(), monday(), 480).unwrap();
        assert_eq!(whole_day.len(), 1);
    }

    #[test]
    fn test_huge_duration_is_empty() {
        let store = AppointmentStore::new();
        for duration in [1_000_000_000_000, i64::MAX] {
            let slots =
                find_open_slots(&store, &BusinessHours::default(), monday(), duration).unwrap();
            assert!(slots.is_empty(), "duration {} should fit nowhere", duration);
        }
    }

    #[test]
    fn test_candidate_grid_stops_at_calendar_end() {
        let hours = BusinessHours::default();
        let last_day = NaiveDate::MAX;
        let starts = candidate_starts(&hours, last_day, TimeDelta::days(2)).count();
        assert_eq!(starts, 0);
    }

    #[test]
    fn test_candidate_grid() {
        let hours = BusinessHours::new(9, 11).unwrap();
        let starts: Vec<String> = candidate_starts(&hours, monday(), TimeDelta::minutes(30))
            .map(|s| s.format("%H:%M").to_string())
            .collect();
        assert_eq!(starts, vec!["09:00", "09:30", "10:00", "10:30"]);
    }

    #[test]
    fn test_serialized_shape() {
        let slot = OpenSlot {
            start: parse_datetime("2024-01-08 09:00").unwrap(),
            end: parse_datetime("2024-01-08 10:00").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(slot).unwrap(),
            serde_json::json!({"start_time": "2024-01-08 09:00", "end_time": "2024-01-08 10:00"})
        );
    }
}
