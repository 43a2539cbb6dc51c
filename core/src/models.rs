use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TimestampError;

/// Storage and display format of a canonical timestamp.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M";

pub const APP_TITLE: &str = "Blood Sugar Tracker";
pub const TABLE_TITLE: &str = "View Blood Sugar Data";
pub const PLOT_TITLE: &str = "Blood Sugar Level Monitoring";
pub const TIMESTAMP_LABEL: &str = "Date & Time";
pub const LEVEL_LABEL: &str = "Blood Sugar Level (mg/dL)";
pub const X_LABEL_ROTATION_DEG: u16 = 45;

/// A reading's key: minute-precision local time, rendered as `MM-DD-YYYY HH:MM`.
///
/// Ordering is chronological, not lexical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalTimestamp(NaiveDateTime);

impl CanonicalTimestamp {
    /// Parse separate date (`MM-DD-YYYY`) and time (`HH:MM`) fields.
    ///
    /// Single-digit month, day, hour, and minute are accepted and come back
    /// zero-padded; the year must be four digits and no AM/PM suffix is allowed.
    pub fn from_parts(date: &str, time: &str) -> Result<Self, TimestampError> {
        if !has_shape(date, '-', &[(1, 2), (1, 2), (4, 4)]) {
            return Err(TimestampError::DateShape);
        }
        if !has_shape(time, ':', &[(1, 2), (1, 2)]) {
            return Err(TimestampError::TimeShape);
        }
        let day = NaiveDate::parse_from_str(date, "%m-%d-%Y")
            .map_err(|_| TimestampError::OutOfRange)?;
        let clock =
            NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| TimestampError::OutOfRange)?;
        Ok(Self(NaiveDateTime::new(day, clock)))
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Seconds since the Unix epoch, treating the reading's wall-clock time as UTC.
    pub fn unix_seconds(&self) -> i64 {
        self.0.and_utc().timestamp()
    }
}

fn has_shape(s: &str, sep: char, widths: &[(usize, usize)]) -> bool {
    let parts: Vec<&str> = s.split(sep).collect();
    parts.len() == widths.len()
        && parts.iter().zip(widths).all(|(part, &(min, max))| {
            (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        })
}

impl fmt::Display for CanonicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for CanonicalTimestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, time) = s.split_once(' ').ok_or(TimestampError::TimeShape)?;
        Self::from_parts(date, time)
    }
}

impl TryFrom<String> for CanonicalTimestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanonicalTimestamp> for String {
    fn from(value: CanonicalTimestamp) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: CanonicalTimestamp,
    /// mg/dL
    pub level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message for the user, with the dialog title the shell should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Rows for the tabular view, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: &'static str,
    pub headers: [&'static str; 2],
    pub rows: Vec<Reading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub timestamp: CanonicalTimestamp,
    /// Chronological x coordinate (Unix seconds).
    pub x: i64,
    pub y: f64,
}

impl From<&Reading> for PlotPoint {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp: reading.timestamp,
            x: reading.timestamp.unix_seconds(),
            y: reading.level,
        }
    }
}

/// A single line series with a marker at every point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_label_rotation_deg: u16,
    pub points: Vec<PlotPoint>,
}

impl PlotView {
    pub fn new(points: Vec<PlotPoint>) -> Self {
        Self {
            title: PLOT_TITLE,
            x_label: TIMESTAMP_LABEL,
            y_label: LEVEL_LABEL,
            x_label_rotation_deg: X_LABEL_ROTATION_DEG,
            points,
        }
    }

    /// `(x, y)` pairs as the chart widget wants them.
    #[allow(clippy::cast_precision_loss)]
    pub fn series(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x as f64, p.y)).collect()
    }

    /// X range covering every point. A single point gets an hour on each side.
    #[allow(clippy::cast_precision_loss)]
    pub fn x_bounds(&self) -> [f64; 2] {
        let min = self.points.iter().map(|p| p.x).min().unwrap_or(0);
        let max = self.points.iter().map(|p| p.x).max().unwrap_or(0);
        if min == max {
            [(min - 3600) as f64, (max + 3600) as f64]
        } else {
            [min as f64, max as f64]
        }
    }

    /// Y range with 5% headroom above and below; flat data gets ±1.
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        let pad = (max - min) * 0.05;
        if pad == 0.0 {
            [min - 1.0, max + 1.0]
        } else {
            [min - pad, max + pad]
        }
    }
}
