//! Configuration types for the calendar.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Wall-clock window in which meetings may be held: `[start_hour:00, end_hour:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl BusinessHours {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ConfigError> {
        let hours = Self {
            start_hour,
            end_hour,
        };
        hours.validate()?;
        Ok(hours)
    }

    /// Opening time on the given date.
    pub fn opening(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(self.start_hour))
    }

    /// Closing time on the given date.
    pub fn closing(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(self.end_hour))
    }

    /// Length of the business window in minutes.
    pub fn window_minutes(&self) -> i64 {
        i64::from(self.end_hour.saturating_sub(self.start_hour)) * 60
    }

    /// Opening hour on a 12-hour clock, e.g. "9 AM".
    pub fn opening_label(&self) -> String {
        twelve_hour_label(self.start_hour)
    }

    /// Closing hour on a 12-hour clock, e.g. "5 PM".
    pub fn closing_label(&self) -> String {
        twelve_hour_label(self.end_hour)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "business hours must lie within 0-23 (got {}-{})",
                self.start_hour, self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigError::Invalid(format!(
                "business_start_hour ({}) must be before business_end_hour ({})",
                self.start_hour, self.end_hour
            )));
        }
        Ok(())
    }
}

fn twelve_hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Configuration for random schedule generation.
///
/// Loaded from JSON at runtime; every field is optional and falls back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Probability that a weekday has any meetings (0.0 to 1.0)
    pub daily_meeting_probability: f64,

    /// Lower bound on meetings for a day that has meetings
    pub min_meetings_per_day: u32,

    /// Upper bound on meetings for a day that has meetings
    pub max_meetings_per_day: u32,

    /// First bookable hour (inclusive)
    pub business_start_hour: u32,

    /// Closing hour (exclusive)
    pub business_end_hour: u32,

    /// Candidate meeting lengths in minutes
    pub meeting_durations: Vec<u32>,

    /// Probability of a light day (1-2 meetings)
    pub light_schedule_prob: f64,

    /// Probability of a medium day (2-3 meetings)
    pub medium_schedule_prob: f64,

    /// Probability of a heavy day (3-4 meetings)
    pub heavy_schedule_prob: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_meeting_probability: 0.7,
            min_meetings_per_day: 1,
            max_meetings_per_day: 4,
            business_start_hour: 9,
            business_end_hour: 17,
            meeting_durations: vec![30, 60, 90, 120],
            light_schedule_prob: 0.3,
            medium_schedule_prob: 0.5,
            heavy_schedule_prob: 0.2,
        }
    }
}

impl ScheduleConfig {
    /// Every weekday booked, mostly heavy days.
    pub fn very_busy() -> Self {
        Self {
            daily_meeting_probability: 1.0,
            light_schedule_prob: 0.0,
            medium_schedule_prob: 0.3,
            heavy_schedule_prob: 0.7,
            ..Self::default()
        }
    }

    /// Nearly every weekday booked, skewed heavy.
    pub fn busy() -> Self {
        Self {
            daily_meeting_probability: 0.9,
            light_schedule_prob: 0.1,
            medium_schedule_prob: 0.3,
            heavy_schedule_prob: 0.6,
            ..Self::default()
        }
    }

    /// Fewer than half the weekdays booked, no heavy days.
    pub fn light() -> Self {
        Self {
            daily_meeting_probability: 0.4,
            light_schedule_prob: 0.7,
            medium_schedule_prob: 0.3,
            heavy_schedule_prob: 0.0,
            ..Self::default()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "default" | "normal" => Some(Self::default()),
            "very_busy" | "verybusy" => Some(Self::very_busy()),
            "busy" => Some(Self::busy()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Business hours described by this config.
    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours {
            start_hour: self.business_start_hour,
            end_hour: self.business_end_hour,
        }
    }

    /// Load and validate a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        info!(path = %path.display(), "Loading schedule config");
        Self::from_json_str(&content)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScheduleConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges. Density probabilities are not required to sum to 1.0;
    /// a mismatch is only logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("daily_meeting_probability", self.daily_meeting_probability),
            ("light_schedule_prob", self.light_schedule_prob),
            ("medium_schedule_prob", self.medium_schedule_prob),
            ("heavy_schedule_prob", self.heavy_schedule_prob),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1] (got {})",
                    name, value
                )));
            }
        }

        self.business_hours().validate()?;

        if self.meeting_durations.is_empty() {
            return Err(ConfigError::Invalid(
                "meeting_durations must not be empty".to_string(),
            ));
        }
        if self.meeting_durations.contains(&0) {
            return Err(ConfigError::Invalid(
                "meeting_durations must be positive".to_string(),
            ));
        }

        if self.min_meetings_per_day == 0 || self.min_meetings_per_day > self.max_meetings_per_day
        {
            return Err(ConfigError::Invalid(format!(
                "meetings per day must satisfy 1 <= min <= max (got {}..{})",
                self.min_meetings_per_day, self.max_meetings_per_day
            )));
        }

        let density_total =
            self.light_schedule_prob + self.medium_schedule_prob + self.heavy_schedule_prob;
        if (density_total - 1.0).abs() > 1e-6 {
            warn!(density_total, "Schedule density probabilities do not sum to 1.0");
        }

        Ok(())
    }
}
