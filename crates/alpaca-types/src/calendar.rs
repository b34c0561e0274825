//! Market clock and calendar

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::decode::Decode;

/// Current market status from `/v2/clock`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Clock {
    pub timestamp: DateTime<Utc>,
    pub is_open: bool,
    pub next_open: DateTime<Utc>,
    pub next_close: DateTime<Utc>,
}

impl Decode for Clock {}

/// One trading day from `/v2/calendar`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarDay {
    /// Trading date
    pub date: NaiveDate,
    /// Session open in exchange local time, `HH:MM`
    pub open: String,
    /// Session close in exchange local time, `HH:MM`
    pub close: String,
}

impl Decode for CalendarDay {}
