//! Thornthwaite day-length correction coefficients (K) by hemisphere, latitude and month.
//!
//! The tables are literal data compiled into the binary. Rows are sorted by ascending
//! latitude and a query picks the nearest row; there is no interpolation between rows.

use crate::correction::error::CoefficientLookupError;
use crate::types::month::Month;
use crate::types::station::Hemisphere;
use ordered_float::OrderedFloat;

/// Twelve coefficients, January to December, for one latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeRow {
    pub latitude: f64,
    pub coefficients: [f64; 12],
}

impl LatitudeRow {
    const fn new(latitude: f64, coefficients: [f64; 12]) -> Self {
        Self {
            latitude,
            coefficients,
        }
    }

    pub fn coefficient(&self, month: Month) -> f64 {
        self.coefficients[month.index()]
    }
}

/// An immutable latitude × month coefficient table for one hemisphere.
#[derive(Debug)]
pub struct CorrectionTable {
    hemisphere: Hemisphere,
    rows: &'static [LatitudeRow],
}

impl CorrectionTable {
    /// The table to use for stations in `hemisphere`.
    pub fn for_hemisphere(hemisphere: Hemisphere) -> &'static CorrectionTable {
        match hemisphere {
            Hemisphere::North => &NORTHERN,
            Hemisphere::South => &SOUTHERN,
        }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn rows(&self) -> &[LatitudeRow] {
        self.rows
    }

    /// The row whose latitude is closest to `latitude`. On a tie the lower latitude wins.
    pub fn nearest_row(&self, latitude: f64) -> Result<&LatitudeRow, CoefficientLookupError> {
        if !latitude.is_finite() {
            return Err(CoefficientLookupError::InvalidLatitude(latitude));
        }
        // min_by_key keeps the first of equal keys, and rows are in ascending latitude.
        self.rows
            .iter()
            .min_by_key(|row| OrderedFloat((row.latitude - latitude).abs()))
            .ok_or(CoefficientLookupError::EmptyTable(self.hemisphere))
    }

    pub fn coefficient(&self, month: Month, latitude: f64) -> Result<f64, CoefficientLookupError> {
        Ok(self.nearest_row(latitude)?.coefficient(month))
    }

    /// Like [`CorrectionTable::coefficient`], for a month given by name.
    pub fn coefficient_for_label(
        &self,
        month: &str,
        latitude: f64,
    ) -> Result<f64, CoefficientLookupError> {
        let month = month
            .parse::<Month>()
            .map_err(|e| CoefficientLookupError::UnknownMonth(e.0))?;
        self.coefficient(month, latitude)
    }
}

/// Looks up K for a hemisphere, month name and sign-less latitude.
///
/// Fails if the month name is not one of the twelve months (after normalization)
/// or the latitude is not a finite number.
pub fn get_coefficient(
    hemisphere: Hemisphere,
    month: &str,
    latitude: f64,
) -> Result<f64, CoefficientLookupError> {
    CorrectionTable::for_hemisphere(hemisphere).coefficient_for_label(month, latitude)
}

pub static NORTHERN: CorrectionTable = CorrectionTable {
    hemisphere: Hemisphere::North,
    rows: &NORTHERN_ROWS,
};

pub static SOUTHERN: CorrectionTable = CorrectionTable {
    hemisphere: Hemisphere::South,
    rows: &SOUTHERN_ROWS,
};

static NORTHERN_ROWS: [LatitudeRow; 31] = [
    LatitudeRow::new(0.0, [1.04, 0.94, 1.04, 1.01, 1.04, 1.01, 1.04, 1.01, 1.04, 1.01, 1.01, 1.01]),
    LatitudeRow::new(5.0, [1.02, 0.93, 1.03, 1.02, 1.06, 1.03, 1.06, 1.05, 1.01, 1.03, 0.99, 1.02]),
    LatitudeRow::new(10.0, [1.0, 0.91, 1.03, 1.03, 1.08, 1.06, 1.08, 1.07, 1.02, 1.02, 0.98, 0.99]),
    LatitudeRow::new(15.0, [0.97, 0.91, 1.03, 1.04, 1.11, 1.08, 1.12, 1.08, 1.02, 1.01, 0.95, 0.97]),
    LatitudeRow::new(20.0, [0.95, 0.9, 1.03, 1.05, 1.13, 1.11, 1.14, 1.11, 1.02, 1.0, 0.93, 0.94]),
    LatitudeRow::new(25.0, [0.93, 0.89, 1.03, 1.06, 1.15, 1.14, 1.17, 1.12, 1.02, 0.99, 0.91, 0.91]),
    LatitudeRow::new(26.0, [0.92, 0.88, 1.03, 1.06, 1.15, 1.15, 1.17, 1.12, 1.02, 0.99, 0.91, 0.91]),
    LatitudeRow::new(27.0, [0.92, 0.88, 1.03, 1.07, 1.16, 1.15, 1.18, 1.13, 1.02, 0.99, 0.9, 0.9]),
    LatitudeRow::new(28.0, [0.91, 0.88, 1.03, 1.07, 1.16, 1.16, 1.18, 1.13, 1.02, 0.98, 0.9, 0.9]),
    LatitudeRow::new(29.0, [0.91, 0.87, 1.03, 1.07, 1.17, 1.16, 1.19, 1.13, 1.03, 0.98, 0.9, 0.89]),
    LatitudeRow::new(30.0, [0.9, 0.87, 1.03, 1.08, 1.18, 1.17, 1.2, 1.14, 1.03, 0.98, 0.89, 0.88]),
    LatitudeRow::new(31.0, [0.9, 0.87, 1.03, 1.08, 1.18, 1.18, 1.2, 1.14, 1.03, 0.98, 0.89, 0.88]),
    LatitudeRow::new(32.0, [0.89, 0.86, 1.03, 1.08, 1.19, 1.19, 1.21, 1.15, 1.03, 0.98, 0.88, 0.87]),
    LatitudeRow::new(33.0, [0.88, 0.86, 1.03, 1.09, 1.19, 1.2, 1.22, 1.15, 1.03, 0.97, 0.88, 0.86]),
    LatitudeRow::new(34.0, [0.88, 0.85, 1.03, 1.09, 1.2, 1.2, 1.22, 1.16, 1.03, 0.97, 0.87, 0.86]),
    LatitudeRow::new(35.0, [0.87, 0.85, 1.03, 1.09, 1.21, 1.21, 1.23, 1.16, 1.03, 0.97, 0.86, 0.85]),
    LatitudeRow::new(36.0, [0.87, 0.85, 1.03, 1.1, 1.21, 1.22, 1.24, 1.16, 1.03, 0.97, 0.86, 0.84]),
    LatitudeRow::new(37.0, [0.86, 0.84, 1.03, 1.1, 1.22, 1.23, 1.25, 1.17, 1.03, 0.97, 0.85, 0.83]),
    LatitudeRow::new(38.0, [0.85, 0.84, 1.03, 1.1, 1.23, 1.24, 1.25, 1.17, 1.04, 0.96, 0.84, 0.83]),
    LatitudeRow::new(39.0, [0.85, 0.84, 1.03, 1.11, 1.23, 1.24, 1.26, 1.18, 1.04, 0.96, 0.84, 0.82]),
    LatitudeRow::new(40.0, [0.84, 0.83, 1.03, 1.11, 1.24, 1.25, 1.27, 1.18, 1.04, 0.96, 0.83, 0.81]),
    LatitudeRow::new(41.0, [0.83, 0.83, 1.03, 1.11, 1.25, 1.26, 1.27, 1.19, 1.04, 0.96, 0.82, 0.8]),
    LatitudeRow::new(42.0, [0.82, 0.83, 1.03, 1.12, 1.26, 1.27, 1.28, 1.19, 1.04, 0.95, 0.82, 0.79]),
    LatitudeRow::new(43.0, [0.81, 0.82, 1.02, 1.12, 1.26, 1.28, 1.29, 1.2, 1.04, 0.95, 0.81, 0.77]),
    LatitudeRow::new(44.0, [0.81, 0.82, 1.02, 1.13, 1.27, 1.29, 1.3, 1.2, 1.04, 0.95, 0.8, 0.76]),
    LatitudeRow::new(45.0, [0.8, 0.81, 1.02, 1.13, 1.28, 1.29, 1.31, 1.21, 1.04, 0.94, 0.79, 0.75]),
    LatitudeRow::new(46.0, [0.79, 0.81, 1.02, 1.13, 1.29, 1.31, 1.32, 1.22, 1.04, 0.94, 0.79, 0.74]),
    LatitudeRow::new(47.0, [0.77, 0.8, 1.02, 1.14, 1.3, 1.32, 1.33, 1.22, 1.04, 0.93, 0.78, 0.73]),
    LatitudeRow::new(48.0, [0.76, 0.8, 1.02, 1.14, 1.31, 1.33, 1.34, 1.23, 1.05, 0.93, 0.77, 0.72]),
    LatitudeRow::new(49.0, [0.75, 0.79, 1.02, 1.14, 1.32, 1.34, 1.35, 1.24, 1.05, 0.93, 0.76, 0.71]),
    LatitudeRow::new(50.0, [0.74, 0.78, 1.02, 1.15, 1.33, 1.36, 1.37, 1.25, 1.06, 0.92, 0.76, 0.7]),];

// 42°/January reads 1.8 against 1.27 and 1.3 on the neighbouring rows. Kept as published.
static SOUTHERN_ROWS: [LatitudeRow; 13] = [
    LatitudeRow::new(5.0, [1.06, 0.95, 1.04, 1.0, 1.02, 0.99, 1.02, 1.03, 1.0, 1.05, 1.03, 1.06]),
    LatitudeRow::new(10.0, [1.08, 0.97, 1.05, 0.99, 1.01, 0.96, 1.0, 1.01, 1.0, 1.06, 1.05, 1.1]),
    LatitudeRow::new(15.0, [1.12, 0.98, 1.05, 0.98, 0.98, 0.94, 0.97, 1.0, 1.0, 1.07, 1.07, 1.12]),
    LatitudeRow::new(20.0, [1.14, 1.0, 1.05, 0.97, 0.96, 0.91, 0.95, 0.99, 1.0, 1.08, 1.09, 1.15]),
    LatitudeRow::new(25.0, [1.17, 1.01, 1.05, 0.96, 0.94, 0.88, 0.93, 0.98, 1.0, 1.1, 1.11, 1.18]),
    LatitudeRow::new(30.0, [1.2, 1.03, 1.06, 0.95, 0.92, 0.85, 0.9, 0.96, 1.0, 1.12, 1.14, 1.21]),
    LatitudeRow::new(35.0, [1.23, 1.04, 1.06, 0.94, 0.89, 0.82, 0.87, 0.94, 1.0, 1.13, 1.17, 1.25]),
    LatitudeRow::new(40.0, [1.27, 1.06, 1.07, 0.93, 0.86, 0.78, 0.84, 0.92, 1.0, 1.15, 1.2, 1.29]),
    LatitudeRow::new(42.0, [1.8, 1.07, 1.07, 0.92, 0.85, 0.76, 0.82, 0.92, 1.0, 1.16, 1.22, 1.31]),
    LatitudeRow::new(44.0, [1.3, 1.08, 1.07, 0.92, 0.83, 0.74, 0.81, 0.91, 0.99, 1.17, 1.23, 1.33]),
    LatitudeRow::new(46.0, [1.32, 1.1, 1.07, 0.91, 0.82, 0.72, 0.79, 0.9, 0.99, 1.17, 1.25, 1.35]),
    LatitudeRow::new(48.0, [1.34, 1.11, 1.08, 0.9, 0.8, 0.7, 0.76, 0.89, 0.99, 1.18, 1.27, 1.37]),
    LatitudeRow::new(50.0, [1.37, 1.12, 1.08, 0.89, 0.77, 0.67, 0.74, 0.88, 0.99, 1.19, 1.29, 1.41]),];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sorted_by_latitude() {
        for table in [&NORTHERN, &SOUTHERN] {
            assert!(table
                .rows()
                .windows(2)
                .all(|pair| pair[0].latitude < pair[1].latitude));
        }
        assert_eq!(NORTHERN.rows().first().map(|r| r.latitude), Some(0.0));
        assert_eq!(NORTHERN.rows().last().map(|r| r.latitude), Some(50.0));
        assert_eq!(SOUTHERN.rows().first().map(|r| r.latitude), Some(5.0));
        assert_eq!(SOUTHERN.rows().last().map(|r| r.latitude), Some(50.0));
    }

    #[test]
    fn exact_anchor_returns_table_value() -> Result<(), CoefficientLookupError> {
        assert_eq!(get_coefficient(Hemisphere::North, "Janvier", 10.0)?, 1.0);
        assert_eq!(get_coefficient(Hemisphere::North, "Juillet", 50.0)?, 1.37);
        assert_eq!(get_coefficient(Hemisphere::South, "Décembre", 50.0)?, 1.41);
        Ok(())
    }

    #[test]
    fn nearest_latitude_wins_and_ties_go_low() -> Result<(), CoefficientLookupError> {
        // 27.5 is equidistant from 27 (0.92) and 28 (0.91).
        assert_eq!(NORTHERN.coefficient(Month::January, 27.5)?, 0.92);
        assert_eq!(NORTHERN.coefficient(Month::January, 27.6)?, 0.91);
        // 12.5 is equidistant from 10 and 15.
        assert_eq!(NORTHERN.nearest_row(12.5)?.latitude, 10.0);
        assert_eq!(NORTHERN.nearest_row(13.0)?.latitude, 15.0);
        Ok(())
    }

    #[test]
    fn queries_outside_the_table_clamp_to_the_edge_rows() -> Result<(), CoefficientLookupError> {
        assert_eq!(SOUTHERN.nearest_row(0.0)?.latitude, 5.0);
        assert_eq!(NORTHERN.nearest_row(60.0)?.latitude, 50.0);
        Ok(())
    }

    #[test]
    fn month_labels_are_normalized_before_lookup() -> Result<(), CoefficientLookupError> {
        assert_eq!(get_coefficient(Hemisphere::South, "fevrier", 5.0)?, 0.95);
        assert_eq!(get_coefficient(Hemisphere::South, "AOÛT", 5.0)?, 1.03);
        Ok(())
    }

    #[test]
    fn unknown_month_fails() {
        assert_eq!(
            get_coefficient(Hemisphere::North, "Brumaire", 10.0),
            Err(CoefficientLookupError::UnknownMonth("Brumaire".to_string()))
        );
    }

    #[test]
    fn non_finite_latitude_fails() {
        assert!(matches!(
            NORTHERN.coefficient(Month::May, f64::NAN),
            Err(CoefficientLookupError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn southern_anomaly_is_preserved() -> Result<(), CoefficientLookupError> {
        assert_eq!(SOUTHERN.coefficient(Month::January, 42.0)?, 1.8);
        Ok(())
    }
}
