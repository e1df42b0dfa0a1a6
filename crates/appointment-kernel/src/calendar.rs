//! Calendar: the shared store together with the business hours it is booked
//! against. This is the handle every component is constructed with.

use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::appointment::{Appointment, AppointmentId, parse_date};
use crate::booking::{MeetingRequest, book};
use crate::config::BusinessHours;
use crate::error::Result;
use crate::slots::{OpenSlot, find_open_slots};
use crate::store::{AppointmentStore, SharedStore};

#[derive(Debug, Clone)]
pub struct Calendar {
    store: SharedStore,
    hours: BusinessHours,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(BusinessHours::default())
    }
}

impl Calendar {
    /// A calendar over a fresh, empty store.
    pub fn new(hours: BusinessHours) -> Self {
        Self::with_store(AppointmentStore::shared(), hours)
    }

    /// A calendar over an existing shared store.
    pub fn with_store(store: SharedStore, hours: BusinessHours) -> Self {
        Self { store, hours }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Shared read access. Every writer completes its mutation before
    /// releasing the lock, so a poisoned lock still guards a consistent store.
    pub fn read(&self) -> RwLockReadGuard<'_, AppointmentStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access for a whole check-then-act sequence.
    pub fn write(&self) -> RwLockWriteGuard<'_, AppointmentStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn appointments_on(&self, date: NaiveDate) -> Vec<Appointment> {
        self.read().get(date).to_vec()
    }

    pub fn all_appointments(&self) -> Vec<Vec<Appointment>> {
        self.read().get_all()
    }

    /// Free slots on a `YYYY-MM-DD` date.
    pub fn open_slots(&self, date: &str, duration_minutes: i64) -> Result<Vec<OpenSlot>> {
        let date = parse_date(date)?;
        self.open_slots_on(date, duration_minutes)
    }

    pub fn open_slots_on(&self, date: NaiveDate, duration_minutes: i64) -> Result<Vec<OpenSlot>> {
        find_open_slots(&self.read(), &self.hours, date, duration_minutes)
    }

    /// Validate and insert under one write lock.
    pub fn book(&self, request: &MeetingRequest) -> Result<Appointment> {
        book(&mut self.write(), &self.hours, request)
    }

    /// Drop every date in `[start, end]`.
    pub fn clear_range(&self, start: NaiveDate, end: NaiveDate) -> usize {
        self.write().clear_range(start, end)
    }

    pub fn remove(&self, date: NaiveDate, id: AppointmentId) -> Option<Appointment> {
        self.write().remove(date, id)
    }

    /// Reset to an empty calendar.
    pub fn clear(&self) {
        self.write().clear();
    }
}
