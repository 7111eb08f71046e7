mod assembler;
pub mod columns;
mod csv;
mod error;
mod extract;
mod frames;

pub use assembler::{assemble_balance_series, assemble_series};
pub(crate) use assembler::group_balance_inputs;
pub use csv::{read_csv, to_csv_string, write_csv, CSV_SEPARATOR};
pub use error::DatasetError;
pub use extract::{read_balance_inputs, read_records, read_stations};
pub use frames::{carried_columns, pet_frame, stations_frame, summary_frame, water_balance_frame};
