mod error;
mod table;

pub use error::CoefficientLookupError;
pub use table::{get_coefficient, CorrectionTable, LatitudeRow, NORTHERN, SOUTHERN};
