mod correction;
mod dataset;
mod error;
mod pet;
mod thornthwaite;
mod types;
mod utils;
mod water_balance;

pub use error::ThornthwaiteError;
pub use thornthwaite::*;

pub use correction::{
    get_coefficient, CoefficientLookupError, CorrectionTable, LatitudeRow, NORTHERN, SOUTHERN,
};
pub use dataset::columns;
pub use dataset::{
    assemble_balance_series, assemble_series, carried_columns, pet_frame, read_balance_inputs,
    read_csv, read_records, read_stations, stations_frame, summary_frame, to_csv_string,
    water_balance_frame, write_csv, DatasetError, CSV_SEPARATOR,
};
pub use pet::*;
pub use water_balance::*;

pub use types::diagnostics::*;
pub use types::error::{SeriesError, StationError, UnknownMonth};
pub use types::month::{normalize_month, Month};
pub use types::record::*;
pub use types::station::*;
pub use utils::round_to;
