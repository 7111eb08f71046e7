use crate::types::station::Hemisphere;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoefficientLookupError {
    #[error("'{0}' is not a month of the correction table")]
    UnknownMonth(String),

    #[error("Latitude {0} cannot be looked up")]
    InvalidLatitude(f64),

    #[error("Station has no hemisphere or latitude")]
    MissingLocation,

    #[error("Correction table for hemisphere {0} has no rows")]
    EmptyTable(Hemisphere),
}
