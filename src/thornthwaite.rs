//! The entry point: a configured calculator that turns monthly observation tables into
//! corrected PET and effective-rainfall tables.

use crate::dataset::columns::{has_columns, normalize_columns, COEFFICIENT, CORRECTED_PET};
use crate::dataset::{
    assemble_balance_series, assemble_series, carried_columns, group_balance_inputs, pet_frame,
    read_stations, summary_frame, water_balance_frame, DatasetError,
};
use crate::error::ThornthwaiteError;
use crate::pet::estimate;
use crate::types::diagnostics::{Diagnostics, GroupOutcome};
use crate::types::record::{PetRow, PetSummary, WaterBalanceRow};
use crate::types::station::Station;
use crate::water_balance::{balance, BalanceInput, BalanceSeries};
use bon::bon;
use log::{info, warn};
use polars::prelude::DataFrame;

/// Reservoir capacity used when none is configured, in mm.
pub const DEFAULT_RFU_MAX: f64 = 100.0;
/// Largest accepted reservoir capacity, in mm.
pub const MAX_RFU: f64 = 500.0;

/// Output of [`Thornthwaite::compute_pet`].
#[derive(Debug, Clone)]
pub struct PetOutput {
    /// The observations annotated with `i`, `ETP (mm)`, `K` and `ETP corrigé (mm)`.
    pub frame: DataFrame,
    /// One row per station-year with `I` and `a`.
    pub summary: DataFrame,
    pub rows: Vec<PetRow>,
    pub summaries: Vec<PetSummary>,
    pub diagnostics: Diagnostics,
}

/// Output of [`Thornthwaite::compute_effective_rainfall`].
#[derive(Debug, Clone)]
pub struct WaterBalanceOutput {
    pub frame: DataFrame,
    pub rows: Vec<WaterBalanceRow>,
    pub diagnostics: Diagnostics,
}

/// Thornthwaite PET and soil-reservoir calculator.
///
/// Station metadata is only consulted when the observations carry no inline
/// `Hémisphère`/`Latitude` columns.
///
/// # Examples
///
/// ```rust
/// # use thornthwaite::{Hemisphere, Station, Thornthwaite, ThornthwaiteError};
/// # fn run() -> Result<(), ThornthwaiteError> {
/// let calculator = Thornthwaite::builder()
///     .rfu_max(150.0)
///     .stations(vec![Station::new("Rabat", Hemisphere::North, 34.0)?])
///     .build()?;
/// assert_eq!(calculator.rfu_max(), 150.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Thornthwaite {
    rfu_max: f64,
    stations: Vec<Station>,
}

#[bon]
impl Thornthwaite {
    /// Creates a calculator.
    ///
    /// * `.rfu_max(f64)`: reservoir capacity in mm, 0 to 500. Defaults to 100.
    /// * `.stations(Vec<Station>)`: typed station metadata.
    /// * `.station_metadata(DataFrame)`: a `Station`/`Hémisphère`/`Latitude` table,
    ///   appended after `stations`.
    ///
    /// # Errors
    ///
    /// [`ThornthwaiteError::InvalidRfuMax`] for a capacity outside 0-500 mm, or a
    /// [`DatasetError`] if the metadata table is malformed.
    #[builder]
    pub fn new(
        #[builder(default = DEFAULT_RFU_MAX)] rfu_max: f64,
        #[builder(default)] stations: Vec<Station>,
        station_metadata: Option<DataFrame>,
    ) -> Result<Self, ThornthwaiteError> {
        if !(0.0..=MAX_RFU).contains(&rfu_max) {
            return Err(ThornthwaiteError::InvalidRfuMax(rfu_max));
        }
        let mut stations = stations;
        if let Some(frame) = station_metadata {
            stations.extend(read_stations(&frame)?);
        }
        Ok(Self { rfu_max, stations })
    }

    pub fn rfu_max(&self) -> f64 {
        self.rfu_max
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Computes heat index, exponent, PET and corrected PET for every complete
    /// station-year in `observations`.
    ///
    /// Incomplete groups are skipped and rows without a coefficient keep blank K and
    /// corrected PET; both are reported in [`PetOutput::diagnostics`].
    ///
    /// # Errors
    ///
    /// Missing columns, unknown months, blank values, stations without metadata, or
    /// [`DatasetError::NoCompleteGroups`] when nothing could be computed.
    pub fn compute_pet(&self, observations: &DataFrame) -> Result<PetOutput, ThornthwaiteError> {
        let mut diagnostics = Diagnostics::default();
        let mut rows = Vec::new();
        let mut summaries = Vec::new();

        for outcome in assemble_series(observations, &self.stations)? {
            match outcome {
                GroupOutcome::Computed(series) => {
                    let estimate = estimate(series);
                    for issue in &estimate.issues {
                        warn!("{issue}");
                    }
                    diagnostics.row_issues.extend(estimate.issues);
                    rows.extend(estimate.rows);
                    summaries.push(estimate.summary);
                }
                GroupOutcome::Skipped(issue) => diagnostics.skipped_groups.push(issue),
            }
        }

        if summaries.is_empty() {
            return Err(DatasetError::NoCompleteGroups.into());
        }
        info!(
            "Computed PET for {} station-year groups ({} skipped)",
            summaries.len(),
            diagnostics.skipped_groups.len()
        );

        Ok(PetOutput {
            frame: pet_frame(&rows, &carried_columns(observations, &rows)?)?,
            summary: summary_frame(&summaries)?,
            rows,
            summaries,
            diagnostics,
        })
    }

    /// Runs the soil-reservoir balance over every complete station-year, starting each
    /// one with a full reservoir.
    ///
    /// `frame` is normally the output of [`Thornthwaite::compute_pet`]. When it has no
    /// `ETP corrigé (mm)` column, PET is computed first.
    pub fn compute_effective_rainfall(
        &self,
        frame: &DataFrame,
    ) -> Result<WaterBalanceOutput, ThornthwaiteError> {
        let mut normalized = frame.clone();
        normalize_columns(&mut normalized)?;

        let mut diagnostics = Diagnostics::default();
        let (groups, with_coefficient) = if has_columns(&normalized, &[CORRECTED_PET]) {
            (
                assemble_balance_series(&normalized)?,
                has_columns(&normalized, &[COEFFICIENT]),
            )
        } else {
            info!("No corrected PET column, computing PET first");
            let pet = self.compute_pet(&normalized)?;
            diagnostics.extend(pet.diagnostics);
            let inputs = pet.rows.iter().map(BalanceInput::from).collect();
            (group_balance_inputs(inputs), true)
        };

        let series: Vec<BalanceSeries> = groups
            .into_iter()
            .filter_map(|outcome| match outcome {
                GroupOutcome::Computed(series) => Some(series),
                GroupOutcome::Skipped(issue) => {
                    diagnostics.skipped_groups.push(issue);
                    None
                }
            })
            .collect();
        if series.is_empty() {
            return Err(DatasetError::NoCompleteGroups.into());
        }
        let group_count = series.len();

        let mut rows = Vec::new();
        for series in series {
            let (balanced, issues) = balance(self.rfu_max, series);
            for issue in &issues {
                warn!("{issue}");
            }
            diagnostics.row_issues.extend(issues);
            rows.extend(balanced);
        }
        info!(
            "Balanced {} station-year groups with RFUmax = {} mm",
            group_count, self.rfu_max
        );

        Ok(WaterBalanceOutput {
            frame: water_balance_frame(&rows, with_coefficient)?,
            rows,
            diagnostics,
        })
    }
}
