//! Random schedule generator.
//!
//! Fills a date range with believable, non-overlapping consulting meetings.
//! Weekends are always left empty. Each weekday rolls for whether it has
//! meetings at all, then for how dense it is, then places meetings by
//! rejection sampling on the 30-minute grid.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use appointment_kernel::conflict::first_overlap;
use appointment_kernel::slots::SLOT_STEP_MINUTES;
use appointment_kernel::{Appointment, Calendar, ScheduleConfig};

use crate::catalog::{CLIENTS, CONSULTANTS, MEETING_DESCRIPTIONS, MEETING_TYPES};

/// Placement attempts per meeting before it is dropped.
pub const MAX_SLOT_ATTEMPTS: usize = 50;

/// Chance that a generated meeting gets a second consultant.
pub const ADDITIONAL_ATTENDEE_PROBABILITY: f64 = 0.3;

/// How packed a generated day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleDensity {
    Light,
    Medium,
    Heavy,
}

impl ScheduleDensity {
    /// Number of meetings a day of this density asks for.
    pub fn meeting_range(self) -> RangeInclusive<u32> {
        match self {
            Self::Light => 1..=2,
            Self::Medium => 2..=3,
            Self::Heavy => 3..=4,
        }
    }
}

/// Appointments produced by one generation run, by date.
///
/// Only dates that received at least one meeting appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedSchedule {
    days: BTreeMap<NaiveDate, Vec<Appointment>>,
}

impl GeneratedSchedule {
    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<Appointment>> {
        &self.days
    }

    pub fn get(&self, date: NaiveDate) -> &[Appointment] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that received meetings.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn total_meetings(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn into_days(self) -> BTreeMap<NaiveDate, Vec<Appointment>> {
        self.days
    }
}

impl fmt::Display for GeneratedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        let days = self.day_count();
        let total = self.total_meetings();
        let average = if days > 0 {
            total as f64 / days as f64
        } else {
            0.0
        };

        writeln!(f, "{}", rule)?;
        writeln!(f, "GENERATED SCHEDULE SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total days with meetings: {}", days)?;
        writeln!(f, "Total meetings generated: {}", total)?;
        writeln!(f, "Average meetings per day: {:.1}", average)?;
        writeln!(f)?;

        for (date, appointments) in &self.days {
            writeln!(
                f,
                "{} - {} meeting(s)",
                date.format("%A, %B %d, %Y"),
                appointments.len()
            )?;
            for appointment in appointments {
                writeln!(
                    f,
                    "  {}-{}: {}",
                    appointment.start_time().format("%H:%M"),
                    appointment.end_time().format("%H:%M"),
                    appointment.title()
                )?;
            }
        }
        write!(f, "{}", rule)
    }
}

/// Generator for random calendars.
///
/// The random source is injected; two generators built from the same config
/// and seed produce identical calendars.
pub struct RandomScheduleGenerator<R = ChaCha8Rng> {
    config: ScheduleConfig,
    rng: R,
}

impl RandomScheduleGenerator<ChaCha8Rng> {
    /// Generator seeded from the thread-local entropy source.
    pub fn new(config: ScheduleConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Reproducible generator.
    pub fn seeded(config: ScheduleConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomScheduleGenerator<R> {
    pub fn with_rng(config: ScheduleConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Generate meetings for every weekday in `[start, end]` and write them
    /// into `calendar`.
    ///
    /// With `clear_existing`, the range is emptied first so repeated runs do
    /// not pile up. Otherwise new meetings are placed around whatever is
    /// already stored. The store's write lock is held for the whole run.
    pub fn generate(
        &mut self,
        calendar: &Calendar,
        start: NaiveDate,
        end: NaiveDate,
        clear_existing: bool,
    ) -> GeneratedSchedule {
        let mut store = calendar.write();

        if clear_existing {
            let cleared = store.clear_range(start, end);
            debug!(%start, %end, cleared, "Cleared existing appointments");
        }

        let mut schedule = GeneratedSchedule::default();

        for date in start.iter_days().take_while(|date| *date <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let roll: f64 = self.rng.random();
            if roll >= self.config.daily_meeting_probability {
                debug!(%date, "No meetings");
                continue;
            }

            let density = self.schedule_density();
            let requested = self.meetings_count(density);
            let slots = self.generate_time_slots(date, requested, store.get(date));

            let appointments: Vec<Appointment> = slots
                .into_iter()
                .filter_map(|(slot_start, slot_end)| {
                    self.generate_appointment(slot_start, slot_end)
                })
                .collect();

            debug!(
                %date,
                ?density,
                requested,
                placed = appointments.len(),
                "Generated day"
            );

            if appointments.is_empty() {
                continue;
            }

            for appointment in &appointments {
                store.insert(date, appointment.clone());
            }
            schedule.days.insert(date, appointments);
        }

        info!(
            %start,
            %end,
            days = schedule.day_count(),
            meetings = schedule.total_meetings(),
            "Generated schedule"
        );

        schedule
    }

    /// Pick light, medium or heavy against the cumulative probabilities.
    fn schedule_density(&mut self) -> ScheduleDensity {
        let roll: f64 = self.rng.random();
        if roll < self.config.light_schedule_prob {
            ScheduleDensity::Light
        } else if roll < self.config.light_schedule_prob + self.config.medium_schedule_prob {
            ScheduleDensity::Medium
        } else {
            ScheduleDensity::Heavy
        }
    }

    /// Meetings wanted for a day, kept within the configured per-day bounds.
    fn meetings_count(&mut self, density: ScheduleDensity) -> u32 {
        let count = self.rng.random_range(density.meeting_range());
        count.clamp(
            self.config.min_meetings_per_day,
            self.config.max_meetings_per_day.max(self.config.min_meetings_per_day),
        )
    }

    /// Place up to `count` non-overlapping intervals on `date`, avoiding
    /// `booked`. A meeting that cannot be placed in `MAX_SLOT_ATTEMPTS`
    /// tries is dropped.
    fn generate_time_slots(
        &mut self,
        date: NaiveDate,
        count: u32,
        booked: &[Appointment],
    ) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        let hours = self.config.business_hours();
        let opening = hours.opening(date);
        let closing = hours.closing(date);

        // Every half hour from opening up to (not including) closing.
        let half_hours = hours.window_minutes() / SLOT_STEP_MINUTES;
        let potential_starts: Vec<NaiveDateTime> = (0..half_hours)
            .map(|k| opening + TimeDelta::minutes(k * SLOT_STEP_MINUTES))
            .collect();

        let mut slots: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();

        for meeting in 0..count {
            let mut placed = false;

            for _ in 0..MAX_SLOT_ATTEMPTS {
                let Some(&duration) = self.config.meeting_durations.choose(&mut self.rng) else {
                    break;
                };
                let Some(&start) = potential_starts.choose(&mut self.rng) else {
                    break;
                };
                let end = start + TimeDelta::minutes(i64::from(duration));

                if end > closing {
                    continue;
                }
                if first_overlap(start, end, &slots).is_some()
                    || first_overlap(start, end, booked).is_some()
                {
                    continue;
                }

                slots.push((start, end));
                placed = true;
                break;
            }

            if !placed {
                debug!(%date, meeting, "No free slot found, skipping meeting");
            }
        }

        slots.sort();
        slots
    }

    /// Dress an interval up as a consulting meeting.
    fn generate_appointment(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<Appointment> {
        let meeting_type = MEETING_TYPES.choose(&mut self.rng)?;
        let client = CLIENTS.choose(&mut self.rng)?;
        let consultant = CONSULTANTS.choose(&mut self.rng)?;

        let mut attendees = vec![consultant.to_string(), client.to_string()];
        if self.rng.random::<f64>() < ADDITIONAL_ATTENDEE_PROBABILITY {
            let additional = CONSULTANTS.choose(&mut self.rng)?;
            if !attendees.iter().any(|a| a == additional) {
                attendees.push(additional.to_string());
            }
        }

        let title = format!("{}: {}", meeting_type, client);
        let description = MEETING_DESCRIPTIONS.choose(&mut self.rng)?;

        Appointment::new(title, start, end, *description, attendees).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appointment_kernel::conflict::overlaps;
    use chrono::Timelike;
    use appointment_kernel::{BusinessHours, MeetingRequest};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Heavy days only, every weekday.
    fn heavy_config() -> ScheduleConfig {
        ScheduleConfig {
            daily_meeting_probability: 1.0,
            min_meetings_per_day: 3,
            max_meetings_per_day: 4,
            light_schedule_prob: 0.0,
            medium_schedule_prob: 0.0,
            heavy_schedule_prob: 1.0,
            ..ScheduleConfig::default()
        }
    }

    fn assert_no_overlaps(appointments: &[Appointment]) {
        for (i, a) in appointments.iter().enumerate() {
            for b in &appointments[i + 1..] {
                assert!(
                    !overlaps(a.start_time(), a.end_time(), b),
                    "{} overlaps {}",
                    a.title(),
                    b.title()
                );
                assert!(!overlaps(b.start_time(), b.end_time(), a));
            }
        }
    }

    #[test]
    fn test_heavy_week() {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 42);

        // Monday 2024-01-08 through Sunday 2024-01-14
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 14), true);

        for day in 8..=12 {
            let appointments = schedule.get(date(2024, 1, day));
            assert!(!appointments.is_empty(), "weekday {} should have meetings", day);
            assert!(appointments.len() <= 4);
            assert_no_overlaps(appointments);
        }
        assert!(schedule.get(date(2024, 1, 13)).is_empty());
        assert!(schedule.get(date(2024, 1, 14)).is_empty());
        assert_eq!(schedule.day_count(), 5);
    }

    #[test]
    fn test_writes_into_store() {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 7);
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 12), true);

        for (day, appointments) in schedule.days() {
            assert_eq!(&calendar.appointments_on(*day), appointments);
        }
        assert_eq!(calendar.read().len(), schedule.total_meetings());
    }

    #[test]
    fn test_deterministic() {
        let run = |seed| {
            let calendar = Calendar::default();
            let mut generator = RandomScheduleGenerator::seeded(ScheduleConfig::default(), seed);
            generator.generate(&calendar, date(2024, 1, 1), date(2024, 1, 31), true)
        };

        assert_eq!(run(123), run(123));
    }

    #[test]
    fn test_zero_probability_generates_nothing() {
        let calendar = Calendar::default();
        let config = ScheduleConfig {
            daily_meeting_probability: 0.0,
            ..ScheduleConfig::default()
        };
        let mut generator = RandomScheduleGenerator::seeded(config, 1);
        let schedule = generator.generate(&calendar, date(2024, 1, 1), date(2024, 1, 31), true);

        assert!(schedule.is_empty());
        assert!(calendar.read().is_empty());
    }

    #[test]
    fn test_clear_existing_prevents_accumulation() {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 9);
        let (start, end) = (date(2024, 1, 8), date(2024, 1, 12));

        generator.generate(&calendar, start, end, true);
        let second = generator.generate(&calendar, start, end, true);

        assert_eq!(calendar.read().len(), second.total_meetings());
    }

    #[test]
    fn test_keeps_existing_appointments_clear() {
        let calendar = Calendar::default();
        calendar
            .book(&MeetingRequest::new(
                "All-hands",
                "2024-01-08 09:00",
                "2024-01-08 13:00",
                "",
                vec![],
            ))
            .unwrap();

        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 11);
        generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 8), false);

        let monday = calendar.appointments_on(date(2024, 1, 8));
        assert_eq!(monday[0].title(), "All-hands");
        assert_no_overlaps(&monday);
    }

    #[test]
    fn test_meetings_stay_within_business_hours() {
        let config = ScheduleConfig {
            business_start_hour: 10,
            business_end_hour: 14,
            ..heavy_config()
        };
        let hours = config.business_hours();
        let calendar = Calendar::new(hours);
        let mut generator = RandomScheduleGenerator::seeded(config, 5);
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 19), true);

        for (day, appointments) in schedule.days() {
            for appointment in appointments {
                assert!(appointment.start_time() >= hours.opening(*day));
                assert!(appointment.end_time() <= hours.closing(*day));
                assert!(matches!(appointment.start_time().minute(), 0 | 30));
            }
        }
    }

    #[test]
    fn test_unplaceable_meetings_are_skipped() {
        // A single two-hour window fits exactly one two-hour meeting.
        let config = ScheduleConfig {
            business_start_hour: 9,
            business_end_hour: 11,
            meeting_durations: vec![120],
            ..heavy_config()
        };
        let calendar = Calendar::new(BusinessHours::new(9, 11).unwrap());
        let mut generator = RandomScheduleGenerator::seeded(config, 3);
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 12), true);

        for appointments in schedule.days().values() {
            assert_eq!(appointments.len(), 1);
        }
    }

    #[test]
    fn test_appointment_shape() {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 21);
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 12), true);

        for appointment in schedule.days().values().flatten() {
            let (meeting_type, client) = appointment.title().split_once(": ").unwrap();
            assert!(MEETING_TYPES.contains(&meeting_type));
            assert!(CLIENTS.contains(&client));
            assert!(MEETING_DESCRIPTIONS.contains(&appointment.description()));

            let attendees = appointment.attendees();
            assert!(attendees.len() == 2 || attendees.len() == 3);
            assert!(CONSULTANTS.contains(&attendees[0].as_str()));
            assert_eq!(attendees[1], client);
            if let Some(extra) = attendees.get(2) {
                assert!(CONSULTANTS.contains(&extra.as_str()));
                assert_ne!(extra, &attendees[0]);
            }
        }
    }

    /// Every weekday booked at one density, with short meetings so every
    /// requested meeting fits.
    fn single_density_config(light: f64, medium: f64, heavy: f64) -> ScheduleConfig {
        ScheduleConfig {
            daily_meeting_probability: 1.0,
            meeting_durations: vec![30],
            light_schedule_prob: light,
            medium_schedule_prob: medium,
            heavy_schedule_prob: heavy,
            ..ScheduleConfig::default()
        }
    }

    fn meetings_per_day(config: ScheduleConfig, seed: u64) -> Vec<usize> {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(config, seed);
        // Four full weeks, Monday 2024-01-08 through Sunday 2024-02-04.
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 2, 4), true);
        assert_eq!(schedule.day_count(), 20);
        schedule.days().values().map(Vec::len).collect()
    }

    #[test]
    fn test_light_days_get_one_or_two_meetings() {
        let counts = meetings_per_day(single_density_config(1.0, 0.0, 0.0), 31);
        assert!(counts.iter().all(|n| (1..=2).contains(n)), "{:?}", counts);
    }

    #[test]
    fn test_medium_days_get_two_or_three_meetings() {
        let counts = meetings_per_day(single_density_config(0.0, 1.0, 0.0), 32);
        assert!(counts.iter().all(|n| (2..=3).contains(n)), "{:?}", counts);
    }

    #[test]
    fn test_density_thresholds_are_cumulative() {
        // light + medium covers every roll, so heavy can never be picked.
        let mut generator =
            RandomScheduleGenerator::seeded(single_density_config(0.5, 0.5, 0.0), 33);
        let picks: Vec<ScheduleDensity> = (0..1000).map(|_| generator.schedule_density()).collect();
        assert!(!picks.contains(&ScheduleDensity::Heavy));
        assert!(picks.contains(&ScheduleDensity::Light));
        assert!(picks.contains(&ScheduleDensity::Medium));
    }

    #[test]
    fn test_density_frequencies_follow_config() {
        let mut generator = RandomScheduleGenerator::seeded(ScheduleConfig::default(), 34);
        let draws = 4000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            let index = match generator.schedule_density() {
                ScheduleDensity::Light => 0,
                ScheduleDensity::Medium => 1,
                ScheduleDensity::Heavy => 2,
            };
            counts[index] += 1;
        }

        // Defaults split 0.3 / 0.5 / 0.2.
        for (count, expected) in counts.iter().zip([0.3, 0.5, 0.2]) {
            let share = *count as f64 / draws as f64;
            assert!((share - expected).abs() < 0.04, "{:?}", counts);
        }
    }

    #[test]
    fn test_density_ranges() {
        assert_eq!(ScheduleDensity::Light.meeting_range(), 1..=2);
        assert_eq!(ScheduleDensity::Medium.meeting_range(), 2..=3);
        assert_eq!(ScheduleDensity::Heavy.meeting_range(), 3..=4);
    }

    #[test]
    fn test_summary_report() {
        let calendar = Calendar::default();
        let mut generator = RandomScheduleGenerator::seeded(heavy_config(), 42);
        let schedule = generator.generate(&calendar, date(2024, 1, 8), date(2024, 1, 8), true);

        let report = schedule.to_string();
        assert!(report.contains("GENERATED SCHEDULE SUMMARY"));
        assert!(report.contains("Total days with meetings: 1"));
        assert!(report.contains("Monday, January 08, 2024"));

        let empty = GeneratedSchedule::default().to_string();
        assert!(empty.contains("Average meetings per day: 0.0"));
    }
}
