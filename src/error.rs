use crate::dataset::DatasetError;
use crate::types::error::StationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThornthwaiteError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Station(#[from] StationError),

    #[error("Reservoir capacity {0} mm is outside 0-500 mm")]
    InvalidRfuMax(f64),
}
