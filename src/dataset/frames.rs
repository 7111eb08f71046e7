//! Builds the output tables from typed rows.

use crate::dataset::columns::*;
use crate::dataset::error::DatasetError;
use crate::types::record::{PetRow, PetSummary, WaterBalanceRow};
use crate::types::station::Station;
use polars::prelude::*;

/// Columns of `observations` outside [`PET_FRAME_COLUMNS`], with their cells reordered to
/// follow `rows`. Each row is matched to its observation through `source_row`.
pub fn carried_columns(
    observations: &DataFrame,
    rows: &[PetRow],
) -> Result<Vec<Column>, DatasetError> {
    let mut frame = observations.clone();
    normalize_columns(&mut frame)?;
    let names: Vec<PlSmallStr> = frame
        .get_column_names()
        .into_iter()
        .filter(|name| !PET_FRAME_COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let indices = IdxCa::from_vec(
        "source_row".into(),
        rows.iter()
            .map(|row| row.record.source_row as IdxSize)
            .collect(),
    );
    Ok(frame.select(names)?.take(&indices)?.take_columns())
}

/// The annotated observation table: the input columns, any `carried` columns, then
/// `i`, `ETP (mm)`, `K` and `ETP corrigé (mm)`.
pub fn pet_frame(rows: &[PetRow], carried: &[Column]) -> Result<DataFrame, DatasetError> {
    let records = rows.iter().map(|row| &row.record);
    let mut columns = vec![
        Column::new(
            STATION.into(),
            records.clone().map(|r| r.station.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            YEAR.into(),
            records.clone().map(|r| r.year.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            MONTH.into(),
            records.clone().map(|r| r.month.label()).collect::<Vec<_>>(),
        ),
        Column::new(
            TEMPERATURE.into(),
            records.clone().map(|r| r.temperature).collect::<Vec<_>>(),
        ),
        Column::new(
            RAINFALL.into(),
            records.clone().map(|r| r.rainfall).collect::<Vec<_>>(),
        ),
        Column::new(
            HEMISPHERE.into(),
            records
                .clone()
                .map(|r| r.hemisphere.map(|h| h.label()))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            LATITUDE.into(),
            records.map(|r| r.latitude).collect::<Vec<_>>(),
        ),
    ];
    columns.extend(carried.iter().cloned());
    columns.extend([
        Column::new(
            SUB_INDEX.into(),
            rows.iter().map(|r| r.sub_index).collect::<Vec<_>>(),
        ),
        Column::new(PET.into(), rows.iter().map(|r| r.pet).collect::<Vec<_>>()),
        Column::new(
            COEFFICIENT.into(),
            rows.iter().map(|r| r.coefficient).collect::<Vec<_>>(),
        ),
        Column::new(
            CORRECTED_PET.into(),
            rows.iter().map(|r| r.corrected_pet).collect::<Vec<_>>(),
        ),
    ]);
    Ok(DataFrame::new(columns)?)
}

/// One row per station-year: `Station`, `Année`, `I`, `a`.
pub fn summary_frame(summaries: &[PetSummary]) -> Result<DataFrame, DatasetError> {
    Ok(DataFrame::new(vec![
        Column::new(
            STATION.into(),
            summaries.iter().map(|s| s.station.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            YEAR.into(),
            summaries.iter().map(|s| s.year.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            HEAT_INDEX.into(),
            summaries.iter().map(|s| s.heat_index).collect::<Vec<_>>(),
        ),
        Column::new(
            EXPONENT.into(),
            summaries.iter().map(|s| s.exponent).collect::<Vec<_>>(),
        ),
    ])?)
}

/// The water-balance table: `Station`, `Année`, `Mois`, `Pluie (mm)`, `K` (only when
/// `with_coefficient`), `ETP utilisé (mm)`, `RFU (mm)`, `ETR (mm)`, `Pluie efficace (mm)`.
pub fn water_balance_frame(
    rows: &[WaterBalanceRow],
    with_coefficient: bool,
) -> Result<DataFrame, DatasetError> {
    let mut columns = vec![
        Column::new(
            STATION.into(),
            rows.iter().map(|r| r.station.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            YEAR.into(),
            rows.iter().map(|r| r.year.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            MONTH.into(),
            rows.iter().map(|r| r.month.label()).collect::<Vec<_>>(),
        ),
        Column::new(
            RAINFALL.into(),
            rows.iter().map(|r| r.rainfall).collect::<Vec<_>>(),
        ),
    ];
    if with_coefficient {
        columns.push(Column::new(
            COEFFICIENT.into(),
            rows.iter().map(|r| r.coefficient).collect::<Vec<_>>(),
        ));
    }
    columns.extend([
        Column::new(
            ETP_USED.into(),
            rows.iter().map(|r| r.etp_used).collect::<Vec<_>>(),
        ),
        Column::new(
            RESERVOIR.into(),
            rows.iter().map(|r| r.reservoir).collect::<Vec<_>>(),
        ),
        Column::new(
            ACTUAL_ET.into(),
            rows.iter().map(|r| r.actual_et).collect::<Vec<_>>(),
        ),
        Column::new(
            EFFECTIVE_RAINFALL.into(),
            rows.iter().map(|r| r.effective_rainfall).collect::<Vec<_>>(),
        ),
    ]);
    Ok(DataFrame::new(columns)?)
}

/// A station metadata table, the inverse of [`crate::dataset::read_stations`].
pub fn stations_frame(stations: &[Station]) -> Result<DataFrame, DatasetError> {
    Ok(DataFrame::new(vec![
        Column::new(
            STATION.into(),
            stations.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            HEMISPHERE.into(),
            stations
                .iter()
                .map(|s| s.hemisphere.label())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            LATITUDE.into(),
            stations.iter().map(|s| s.latitude).collect::<Vec<_>>(),
        ),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::extract::read_stations;
    use crate::types::month::Month;
    use crate::types::station::Hemisphere;

    #[test]
    fn water_balance_columns_follow_the_export_order() -> Result<(), Box<dyn std::error::Error>> {
        let row = WaterBalanceRow {
            station: "Rabat".to_string(),
            year: "2015".to_string(),
            month: Month::April,
            rainfall: 40.0,
            coefficient: Some(1.07),
            etp_used: Some(62.1),
            reservoir: 77.9,
            actual_et: Some(40.0),
            effective_rainfall: Some(0.0),
        };
        let with_k = water_balance_frame(std::slice::from_ref(&row), true)?;
        let names: Vec<String> = with_k
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                STATION,
                YEAR,
                MONTH,
                RAINFALL,
                COEFFICIENT,
                ETP_USED,
                RESERVOIR,
                ACTUAL_ET,
                EFFECTIVE_RAINFALL
            ]
        );
        let without_k = water_balance_frame(&[row], false)?;
        assert_eq!(without_k.width(), 8);
        assert!(without_k.get_column_index(COEFFICIENT).is_none());
        Ok(())
    }

    #[test]
    fn stations_round_trip_through_a_frame() -> Result<(), Box<dyn std::error::Error>> {
        let stations = vec![
            Station::new("Rabat", Hemisphere::North, 34.0)?,
            Station::new("Durban", Hemisphere::South, 29.9)?,
        ];
        assert_eq!(read_stations(&stations_frame(&stations)?)?, stations);
        Ok(())
    }
}
