//! Conflict checking: the single half-open overlap predicate.

use chrono::{NaiveDate, NaiveDateTime};

use crate::appointment::Appointment;
use crate::store::AppointmentStore;

/// Anything occupying a `[start, end)` interval on the calendar.
pub trait TimeSpan {
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;
}

impl TimeSpan for Appointment {
    fn start(&self) -> NaiveDateTime {
        self.start_time()
    }

    fn end(&self) -> NaiveDateTime {
        self.end_time()
    }
}

impl TimeSpan for (NaiveDateTime, NaiveDateTime) {
    fn start(&self) -> NaiveDateTime {
        self.0
    }

    fn end(&self) -> NaiveDateTime {
        self.1
    }
}

/// Half-open overlap test. Touching intervals (one ends exactly where the
/// other starts) do not overlap.
pub fn overlaps(start: NaiveDateTime, end: NaiveDateTime, existing: &impl TimeSpan) -> bool {
    start < existing.end() && end > existing.start()
}

/// First span in `spans` that overlaps `[start, end)`.
pub fn first_overlap<'a, T: TimeSpan>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    spans: impl IntoIterator<Item = &'a T>,
) -> Option<&'a T>
where
    T: 'a,
{
    spans
        .into_iter()
        .find(|existing| overlaps(start, end, *existing))
}

/// The stored appointment on `date` that clashes with `[start, end)`, if any.
pub fn find_conflict<'a>(
    store: &'a AppointmentStore,
    date: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Option<&'a Appointment> {
    first_overlap(start, end, store.get(date))
}

/// True iff `[start, end)` overlaps any appointment stored under `date`.
pub fn has_conflict(
    store: &AppointmentStore,
    date: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    find_conflict(store, date, start, end).is_some()
}
