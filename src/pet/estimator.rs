//! Applies the Thornthwaite equations to a station-year and corrects each month
//! with the hemisphere/latitude coefficient.

use crate::correction::{CoefficientLookupError, CorrectionTable};
use crate::pet::formula::{exponent, heat_index, monthly_pet, sub_index};
use crate::types::diagnostics::{RowIssue, RowIssueKind};
use crate::types::record::{MonthlyRecord, PetRow, PetSummary, StationYearSeries};
use crate::utils::round_to;
use log::debug;

/// PET results for one station-year.
#[derive(Debug, Clone, PartialEq)]
pub struct PetEstimate {
    pub summary: PetSummary,
    /// Twelve rows in calendar order.
    pub rows: Vec<PetRow>,
    /// Rows whose coefficient could not be looked up.
    pub issues: Vec<RowIssue>,
}

fn coefficient_for(record: &MonthlyRecord) -> Result<f64, CoefficientLookupError> {
    match (record.hemisphere, record.latitude) {
        (Some(hemisphere), Some(latitude)) => {
            CorrectionTable::for_hemisphere(hemisphere).coefficient(record.month, latitude)
        }
        _ => Err(CoefficientLookupError::MissingLocation),
    }
}

/// Computes heat index, exponent, PET and corrected PET for a complete station-year.
///
/// A failed coefficient lookup blanks K and corrected PET for that month only.
pub fn estimate(series: StationYearSeries) -> PetEstimate {
    let i_annual = heat_index(series.temperatures());
    let a = exponent(i_annual);
    debug!(
        "{} {}: I = {:.3}, a = {:.5}",
        series.station(),
        series.year(),
        i_annual,
        a
    );

    let summary = PetSummary {
        station: series.station().to_string(),
        year: series.year().to_string(),
        heat_index: round_to(i_annual, 3),
        exponent: round_to(a, 5),
    };

    let mut issues = Vec::new();
    let rows = series
        .records()
        .iter()
        .map(|record| {
            let pet = round_to(monthly_pet(record.temperature, i_annual, a), 2);
            let (coefficient, corrected_pet) = match coefficient_for(record) {
                Ok(k) => (Some(round_to(k, 3)), Some(round_to(k * pet, 2))),
                Err(e) => {
                    issues.push(RowIssue {
                        station: record.station.clone(),
                        year: record.year.clone(),
                        month: record.month,
                        kind: RowIssueKind::MissingCoefficient(e),
                    });
                    (None, None)
                }
            };
            PetRow {
                record: record.clone(),
                sub_index: sub_index(record.temperature),
                pet,
                coefficient,
                corrected_pet,
            }
        })
        .collect();

    PetEstimate {
        summary,
        rows,
        issues,
    }
}
