//! Typed extraction of table rows from normalized polars frames.

use crate::dataset::columns::*;
use crate::dataset::error::DatasetError;
use crate::types::month::{normalize_month, Month};
use crate::types::record::MonthlyRecord;
use crate::types::station::{Hemisphere, Station};
use crate::water_balance::BalanceInput;
use polars::prelude::*;

fn get_opt_strings(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(|s| s.trim().to_string()))
        .collect())
}

/// Float values; unparsable cells, nulls and NaN all come back as `None`.
fn get_opt_floats(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Year labels as text. Whole float years (2023.0) are written without decimals.
fn get_opt_years(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
    let column = frame.column(name)?;
    match column.dtype() {
        DataType::Float32 | DataType::Float64 => Ok(get_opt_floats(frame, name)?
            .into_iter()
            .map(|value| {
                value.map(|v| {
                    if v.fract() == 0.0 {
                        format!("{v:.0}")
                    } else {
                        v.to_string()
                    }
                })
            })
            .collect()),
        _ => get_opt_strings(frame, name),
    }
}

fn required<T>(value: Option<T>, row: usize, column: &str) -> Result<T, DatasetError> {
    value.ok_or_else(|| DatasetError::InvalidValue {
        row,
        column: column.to_string(),
    })
}

fn parse_month(label: Option<String>, row: usize) -> Result<Month, DatasetError> {
    let normalized = normalize_month(&required(label, row, MONTH)?);
    Month::from_label(&normalized).ok_or(DatasetError::UnknownMonth {
        row,
        label: normalized,
    })
}

/// Reads the observation rows of a normalized frame.
///
/// Hemisphere and latitude are taken from the frame only when both columns are present;
/// otherwise they are left `None` for the assembler to fill from station metadata.
/// Returns the records and whether location columns were found.
pub fn read_records(frame: &DataFrame) -> Result<(Vec<MonthlyRecord>, bool), DatasetError> {
    require_columns(frame, &REQUIRED_OBSERVATION_COLUMNS)?;

    let stations = get_opt_strings(frame, STATION)?;
    let years = get_opt_years(frame, YEAR)?;
    let months = get_opt_strings(frame, MONTH)?;
    let temperatures = get_opt_floats(frame, TEMPERATURE)?;
    let rainfall = get_opt_floats(frame, RAINFALL)?;

    let inline_location = has_columns(frame, &[HEMISPHERE, LATITUDE]);
    let (hemispheres, latitudes) = if inline_location {
        (
            get_opt_strings(frame, HEMISPHERE)?,
            get_opt_floats(frame, LATITUDE)?,
        )
    } else {
        (vec![None; frame.height()], vec![None; frame.height()])
    };

    let records = stations
        .into_iter()
        .zip(years)
        .zip(months)
        .zip(temperatures.into_iter().zip(rainfall))
        .zip(hemispheres.into_iter().zip(latitudes))
        .enumerate()
        .map(
            |(row, ((((station, year), month), (temperature, rainfall)), (hemisphere, latitude)))|
             -> Result<MonthlyRecord, DatasetError> {
                let hemisphere = hemisphere
                    .filter(|h| !h.is_empty())
                    .map(|h| h.parse::<Hemisphere>())
                    .transpose()
                    .map_err(|source| DatasetError::InvalidStation { row, source })?;
                Ok(MonthlyRecord {
                    station: required(station, row, STATION)?,
                    year: required(year, row, YEAR)?,
                    month: parse_month(month, row)?,
                    temperature: required(temperature, row, TEMPERATURE)?,
                    rainfall: required(rainfall, row, RAINFALL)?,
                    hemisphere,
                    latitude,
                    source_row: row,
                })
            },
        )
        .collect::<Result<Vec<_>, _>>()?;

    Ok((records, inline_location))
}

/// Reads the rows of an annotated frame for the water balance. `K` is optional and a
/// blank corrected PET is kept as `None`.
pub fn read_balance_inputs(frame: &DataFrame) -> Result<Vec<BalanceInput>, DatasetError> {
    require_columns(frame, &[STATION, YEAR, MONTH, RAINFALL, CORRECTED_PET])?;

    let stations = get_opt_strings(frame, STATION)?;
    let years = get_opt_years(frame, YEAR)?;
    let months = get_opt_strings(frame, MONTH)?;
    let rainfall = get_opt_floats(frame, RAINFALL)?;
    let corrected = get_opt_floats(frame, CORRECTED_PET)?;
    let coefficients = if has_columns(frame, &[COEFFICIENT]) {
        get_opt_floats(frame, COEFFICIENT)?
    } else {
        vec![None; frame.height()]
    };

    stations
        .into_iter()
        .zip(years)
        .zip(months)
        .zip(rainfall)
        .zip(corrected.into_iter().zip(coefficients))
        .enumerate()
        .map(
            |(row, ((((station, year), month), rainfall), (corrected_pet, coefficient)))|
             -> Result<BalanceInput, DatasetError> {
                Ok(BalanceInput {
                    station: required(station, row, STATION)?,
                    year: required(year, row, YEAR)?,
                    month: parse_month(month, row)?,
                    rainfall: required(rainfall, row, RAINFALL)?,
                    coefficient,
                    corrected_pet,
                })
            },
        )
        .collect()
}

/// Reads a station metadata table (`Station`, `Hémisphère`, `Latitude`).
pub fn read_stations(frame: &DataFrame) -> Result<Vec<Station>, DatasetError> {
    let mut frame = frame.clone();
    normalize_columns(&mut frame)?;
    require_columns(&frame, &REQUIRED_STATION_COLUMNS)?;

    let names = get_opt_strings(&frame, STATION)?;
    let hemispheres = get_opt_strings(&frame, HEMISPHERE)?;
    let latitudes = get_opt_floats(&frame, LATITUDE)?;

    names
        .into_iter()
        .zip(hemispheres)
        .zip(latitudes)
        .enumerate()
        .map(|(row, ((name, hemisphere), latitude))| -> Result<Station, DatasetError> {
            let hemisphere = required(hemisphere, row, HEMISPHERE)?
                .parse::<Hemisphere>()
                .map_err(|source| DatasetError::InvalidStation { row, source })?;
            Station::new(
                required(name, row, STATION)?,
                hemisphere,
                required(latitude, row, LATITUDE)?,
            )
            .map_err(|source| DatasetError::InvalidStation { row, source })
        })
        .collect()
}
