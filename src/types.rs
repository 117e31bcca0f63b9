use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the fetched dataset: the place behind a ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub city: String,
    pub state: String,
    pub county: String,
}

/// One entry of the embedded frost-normals dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrostRecord {
    pub zipcode: String,
    pub state_province: String,
    pub country: String,
    /// Name of the NOAA station closest to the ZIP centroid
    pub station_name: String,
    /// Station elevation in feet
    pub station_altitude: i64,
    /// Straight-line distance from the ZIP centroid to the station
    pub station_distance_miles: f64,
    pub last_freeze: String,
    pub first_freeze: String,
    /// Days between last and first freeze, 0-365
    pub growing_days: u16,
}

impl FrostRecord {
    /// Typed view of the last-freeze descriptor
    pub fn last_freeze_date(&self) -> FreezeDate {
        FreezeDate::parse(&self.last_freeze)
    }

    /// Typed view of the first-freeze descriptor
    pub fn first_freeze_date(&self) -> FreezeDate {
        FreezeDate::parse(&self.first_freeze)
    }
}

/// Freeze descriptor: either a formatted month-day date or one of the two
/// sentinels used for stations that never thaw or never freeze in the
/// 1991-2020 daily normals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeDate {
    /// A formatted date such as "April 15"
    Date(String),
    /// Daily-normal minimum never clears 32F
    YearRoundRisk,
    /// No freeze anywhere in the normals
    InfrequentFrost,
}

impl FreezeDate {
    /// Parse from the dataset's descriptor string
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "year-round risk" => Self::YearRoundRisk,
            // Earlier dataset exports spell this sentinel "No frost / very infrequent"
            "infrequent frost" | "No frost / very infrequent" => Self::InfrequentFrost,
            other => Self::Date(other.to_string()),
        }
    }

    /// Growing days implied by a sentinel; `None` for real dates, where the
    /// value comes from the dataset instead
    pub fn implied_growing_days(&self) -> Option<u16> {
        match self {
            Self::YearRoundRisk => Some(0),
            Self::InfrequentFrost => Some(365),
            Self::Date(_) => None,
        }
    }
}

impl fmt::Display for FreezeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d),
            Self::YearRoundRisk => write!(f, "year-round risk"),
            Self::InfrequentFrost => write!(f, "infrequent frost"),
        }
    }
}
