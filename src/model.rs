// Domain records shared by the store, the availability counter and the search compressor

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// Compact date format used by the data files and the command syntax
pub const DATE_FORMAT: &str = "%Y%m%d";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono accepts 5+ digit years for %Y, so pin the width first
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// serde adapter for `yyyyMMdd` dates
pub mod compact_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).ok_or_else(|| {
            D::Error::custom(format!(
                "Invalid date format for '{}', expected 'yyyyMMdd'",
                value
            ))
        })
    }
}

// Data structures for the hotels file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub room_types: Vec<RoomTypeInfo>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeInfo {
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_type: String,
    pub room_id: String,
}

// Data structures for the bookings file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub hotel_id: String,
    #[serde(with = "compact_date")]
    pub arrival: NaiveDate,
    #[serde(with = "compact_date")]
    pub departure: NaiveDate,
    pub room_type: String,
    #[serde(default)]
    pub room_rate: String,
}

impl Booking {
    // Nights [arrival, departure) against the closed window [from, to]
    pub fn overlaps(&self, window: &DateInterval) -> bool {
        self.departure > window.from && self.arrival <= window.to
    }
}

// Closed date window [from, to] used for occupancy counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateInterval {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |day| *day <= to)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", format_date(self.from), format_date(self.to))
    }
}

// One day of the search horizon, consumed right away by the compressor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub count: i64,
}

impl DayAvailability {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }
}

// Maximal run of contiguous days with one positive count, `end` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
    pub count: i64,
}

impl AvailabilityRange {
    pub fn new(begin: NaiveDate, end: NaiveDate, count: i64) -> Self {
        Self { begin, end, count }
    }

    // Expand back into the per-day sequence it was built from
    pub fn expand(&self) -> Vec<DayAvailability> {
        DateInterval::new(self.begin, self.end)
            .days()
            .map(|date| DayAvailability::new(date, self.count))
            .collect()
    }
}

impl fmt::Display for AvailabilityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            format_date(self.begin),
            format_date(self.end),
            self.count
        )
    }
}

// Next calendar day, None only at the end of chrono's supported range
pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}
