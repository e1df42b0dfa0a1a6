//! AppointmentStore: appointments grouped by calendar date.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use crate::appointment::{Appointment, AppointmentId};

/// Store shared between the booking path, the slot finder and the generator.
///
/// Every check-then-act sequence must hold the write lock for its whole
/// duration.
pub type SharedStore = Arc<RwLock<AppointmentStore>>;

/// Appointments keyed by date.
///
/// Date keys are reported in the order they were first inserted. The store
/// does not validate what it is given; callers conflict-check first.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    days: HashMap<NaiveDate, Vec<Appointment>>,
    /// Date keys in insertion order.
    order: Vec<NaiveDate>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an empty store for sharing.
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Appointments filed under `date`, in insertion order.
    pub fn get(&self, date: NaiveDate) -> &[Appointment] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All appointments grouped by date, in date-key insertion order.
    pub fn get_all(&self) -> Vec<Vec<Appointment>> {
        self.order
            .iter()
            .filter_map(|date| self.days.get(date).cloned())
            .collect()
    }

    /// Append an appointment under `date`, creating the day if needed.
    pub fn insert(&mut self, date: NaiveDate, appointment: Appointment) {
        self.days
            .entry(date)
            .or_insert_with(|| {
                self.order.push(date);
                Vec::new()
            })
            .push(appointment);
    }

    /// Drop every date key in `[start, end]`. Returns the number of
    /// appointments discarded.
    pub fn clear_range(&mut self, start: NaiveDate, end: NaiveDate) -> usize {
        let in_range = |date: &NaiveDate| *date >= start && *date <= end;

        let removed: usize = self
            .order
            .iter()
            .filter(|date| in_range(*date))
            .filter_map(|date| self.days.remove(date))
            .map(|appointments| appointments.len())
            .sum();
        self.order.retain(|date| !in_range(date));

        removed
    }

    /// Remove a single appointment. The date key disappears with its last
    /// appointment.
    pub fn remove(&mut self, date: NaiveDate, id: AppointmentId) -> Option<Appointment> {
        let appointments = self.days.get_mut(&date)?;
        let index = appointments.iter().position(|a| a.id() == id)?;
        let removed = appointments.remove(index);

        if appointments.is_empty() {
            self.days.remove(&date);
            self.order.retain(|d| *d != date);
        }

        Some(removed)
    }

    /// Discard everything.
    pub fn clear(&mut self) {
        self.days.clear();
        self.order.clear();
    }

    /// Dates with at least one appointment, in insertion order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.order
    }

    /// Total number of appointments.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
