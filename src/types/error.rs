use crate::types::month::Month;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a recognised month")]
pub struct UnknownMonth(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    #[error("Station name is empty")]
    EmptyName,

    #[error("Latitude {latitude} of station '{station}' is outside 0-60 degrees")]
    LatitudeOutOfRange { station: String, latitude: f64 },

    #[error("'{0}' is not a hemisphere (expected Nord or Sud)")]
    UnknownHemisphere(String),
}

/// Reasons a station-year group cannot be turned into a twelve-month series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("{found} months instead of 12")]
    WrongMonthCount { found: usize },

    #[error("month {0} appears more than once")]
    DuplicateMonth(Month),
}
