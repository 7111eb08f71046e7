//! Row types flowing through the PET and water-balance stages.

use crate::types::error::SeriesError;
use crate::types::month::Month;
use crate::types::station::Hemisphere;
use serde::{Deserialize, Serialize};

/// One month of observations for one station and year.
///
/// `hemisphere` and `latitude` are resolved from inline columns or from station
/// metadata; they are optional because inline columns may contain blanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub station: String,
    /// Year label as given by the dataset; it is not required to be numeric.
    pub year: String,
    pub month: Month,
    /// Mean temperature in °C.
    pub temperature: f64,
    /// Rainfall in mm.
    pub rainfall: f64,
    pub hemisphere: Option<Hemisphere>,
    pub latitude: Option<f64>,
    /// Row of the observation table the record was read from.
    pub source_row: usize,
}

/// Sorts `rows` into calendar order, checking there is exactly one row per month.
pub(crate) fn calendar_order<T>(
    mut rows: Vec<T>,
    month_of: impl Fn(&T) -> Month,
) -> Result<Vec<T>, SeriesError> {
    if rows.len() != 12 {
        return Err(SeriesError::WrongMonthCount { found: rows.len() });
    }
    rows.sort_by_key(|row| month_of(row));
    if let Some(pair) = rows.windows(2).find(|pair| month_of(&pair[0]) == month_of(&pair[1])) {
        return Err(SeriesError::DuplicateMonth(month_of(&pair[0])));
    }
    Ok(rows)
}

/// The twelve records of one station-year, in calendar order. This is the unit of
/// computation for both the PET estimator and the water-balance simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct StationYearSeries {
    station: String,
    year: String,
    records: Vec<MonthlyRecord>,
}

impl StationYearSeries {
    /// Builds a series from the records of one group, in any order.
    ///
    /// Fails if the group does not hold exactly one record for each of the twelve months.
    pub fn new(
        station: impl Into<String>,
        year: impl Into<String>,
        records: Vec<MonthlyRecord>,
    ) -> Result<Self, SeriesError> {
        Ok(Self {
            station: station.into(),
            year: year.into(),
            records: calendar_order(records, |record| record.month)?,
        })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.temperature)
    }
}

/// A [`MonthlyRecord`] annotated with the Thornthwaite outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRow {
    pub record: MonthlyRecord,
    /// Monthly heat sub-index `i`, unrounded.
    pub sub_index: f64,
    /// Uncorrected PET in mm, rounded to 2 decimals.
    pub pet: f64,
    /// Correction coefficient K rounded to 3 decimals; `None` when the lookup failed.
    pub coefficient: Option<f64>,
    /// K × PET in mm, rounded to 2 decimals; `None` when K is missing.
    pub corrected_pet: Option<f64>,
}

/// Heat index and exponent of one station-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSummary {
    pub station: String,
    pub year: String,
    /// Heat index `I`, rounded to 3 decimals.
    pub heat_index: f64,
    /// Exponent `a`, rounded to 5 decimals.
    pub exponent: f64,
}

/// One month of the soil-reservoir balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceRow {
    pub station: String,
    pub year: String,
    pub month: Month,
    pub rainfall: f64,
    pub coefficient: Option<f64>,
    /// Corrected PET the month was balanced against.
    pub etp_used: Option<f64>,
    /// Reservoir level at the end of the month, mm.
    pub reservoir: f64,
    pub actual_et: Option<f64>,
    pub effective_rainfall: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: Month) -> MonthlyRecord {
        MonthlyRecord {
            station: "Bamako".to_string(),
            year: "2021".to_string(),
            month,
            temperature: 20.0 + month.index() as f64,
            rainfall: 10.0,
            hemisphere: Some(Hemisphere::North),
            latitude: Some(12.6),
            source_row: month.index(),
        }
    }

    #[test]
    fn series_is_sorted_into_calendar_order() -> Result<(), SeriesError> {
        let shuffled = Month::ALL.into_iter().rev().map(record).collect();
        let series = StationYearSeries::new("Bamako", "2021", shuffled)?;
        let months: Vec<Month> = series.records().iter().map(|r| r.month).collect();
        assert_eq!(months, Month::ALL.to_vec());
        assert_eq!(series.temperatures().next(), Some(20.0));
        Ok(())
    }

    #[test]
    fn series_rejects_missing_months() {
        let eleven = Month::ALL[..11].iter().copied().map(record).collect();
        assert_eq!(
            StationYearSeries::new("Bamako", "2021", eleven),
            Err(SeriesError::WrongMonthCount { found: 11 })
        );
    }

    #[test]
    fn series_rejects_duplicated_months() {
        let mut rows: Vec<MonthlyRecord> = Month::ALL[..11].iter().copied().map(record).collect();
        rows.push(record(Month::March));
        assert_eq!(
            StationYearSeries::new("Bamako", "2021", rows),
            Err(SeriesError::DuplicateMonth(Month::March))
        );
    }
}
