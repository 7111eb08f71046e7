use crate::types::diagnostics::{RowIssue, RowIssueKind};
use crate::types::error::SeriesError;
use crate::types::month::Month;
use crate::types::record::{calendar_order, PetRow, WaterBalanceRow};
use crate::water_balance::reservoir::simulate;

/// One month of input to the water balance: rainfall and the corrected PET it is
/// balanced against.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceInput {
    pub station: String,
    pub year: String,
    pub month: Month,
    pub rainfall: f64,
    pub coefficient: Option<f64>,
    pub corrected_pet: Option<f64>,
}

impl From<&PetRow> for BalanceInput {
    fn from(row: &PetRow) -> Self {
        Self {
            station: row.record.station.clone(),
            year: row.record.year.clone(),
            month: row.record.month,
            rainfall: row.record.rainfall,
            coefficient: row.coefficient,
            corrected_pet: row.corrected_pet,
        }
    }
}

/// The twelve months of one station-year, ready to be balanced.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSeries {
    months: Vec<BalanceInput>,
}

impl BalanceSeries {
    /// Puts the months in calendar order, checking each month appears once.
    pub fn new(months: Vec<BalanceInput>) -> Result<Self, SeriesError> {
        Ok(Self {
            months: calendar_order(months, |input| input.month)?,
        })
    }

    pub fn months(&self) -> &[BalanceInput] {
        &self.months
    }
}

/// Balances a station-year against a reservoir of `capacity` mm, starting full.
///
/// Months without corrected PET are reported and left without ETR or effective rainfall.
pub fn balance(capacity: f64, series: BalanceSeries) -> (Vec<WaterBalanceRow>, Vec<RowIssue>) {
    let outputs = simulate(
        capacity,
        series
            .months
            .iter()
            .map(|input| (input.rainfall, input.corrected_pet)),
    );

    let issues = series
        .months
        .iter()
        .filter(|input| input.corrected_pet.is_none())
        .map(|input| RowIssue {
            station: input.station.clone(),
            year: input.year.clone(),
            month: input.month,
            kind: RowIssueKind::MissingCorrectedPet,
        })
        .collect();

    let rows = series
        .months
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| WaterBalanceRow {
            station: input.station,
            year: input.year,
            month: input.month,
            rainfall: input.rainfall,
            coefficient: input.coefficient,
            etp_used: input.corrected_pet,
            reservoir: output.reservoir,
            actual_et: output.actual_et,
            effective_rainfall: output.effective_rainfall,
        })
        .collect();

    (rows, issues)
}
