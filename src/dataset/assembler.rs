//! Joins station metadata onto observations and splits them into station-year groups.

use crate::dataset::columns::normalize_columns;
use crate::dataset::error::DatasetError;
use crate::dataset::extract::{read_balance_inputs, read_records};
use crate::types::diagnostics::{GroupIssue, GroupOutcome};
use crate::types::error::SeriesError;
use crate::types::record::{MonthlyRecord, StationYearSeries};
use crate::types::station::Station;
use crate::water_balance::{BalanceInput, BalanceSeries};
use log::warn;
use ordered_float::OrderedFloat;
use polars::prelude::DataFrame;
use std::collections::{HashMap, HashSet};

type GroupKey = (String, String);

/// Splits rows into (station, year) groups. Groups come out in the order their first
/// row was seen, and rows keep their relative order within a group.
pub(crate) fn group_by_station_year<T>(
    rows: Vec<T>,
    key_of: impl Fn(&T) -> GroupKey,
) -> Vec<(GroupKey, Vec<T>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<T>)> = Vec::new();
    for row in rows {
        let key = key_of(&row);
        match index.get(&key) {
            Some(&position) => groups[position].1.push(row),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }
    groups
}

/// Station lookup by name; the first entry wins when a name is repeated.
fn station_index(stations: &[Station]) -> HashMap<&str, &Station> {
    let mut index = HashMap::new();
    for station in stations {
        index.entry(station.name.as_str()).or_insert(station);
    }
    index
}

/// Fills hemisphere and latitude from station metadata, failing with every station
/// name that has no metadata.
fn merge_stations(
    records: &mut [MonthlyRecord],
    stations: &[Station],
) -> Result<(), DatasetError> {
    if stations.is_empty() {
        return Err(DatasetError::MissingStationMetadata);
    }
    let index = station_index(stations);

    let mut unmatched: Vec<String> = Vec::new();
    for record in records.iter_mut() {
        match index.get(record.station.as_str()) {
            Some(station) => {
                record.hemisphere = Some(station.hemisphere);
                record.latitude = Some(station.latitude);
            }
            None => {
                if !unmatched.contains(&record.station) {
                    unmatched.push(record.station.clone());
                }
            }
        }
    }

    if unmatched.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::UnmatchedStations(unmatched))
    }
}

type RecordKey = (
    String,
    String,
    usize,
    OrderedFloat<f64>,
    OrderedFloat<f64>,
    Option<&'static str>,
    Option<OrderedFloat<f64>>,
);

fn record_key(record: &MonthlyRecord) -> RecordKey {
    (
        record.station.clone(),
        record.year.clone(),
        record.month.index(),
        OrderedFloat(record.temperature),
        OrderedFloat(record.rainfall),
        record.hemisphere.map(|h| h.label()),
        record.latitude.map(OrderedFloat),
    )
}

/// Drops rows that repeat an earlier row exactly.
fn drop_duplicates(records: Vec<MonthlyRecord>) -> Vec<MonthlyRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record_key(record)))
        .collect()
}

fn skipped<T>(station: String, year: String, reason: SeriesError) -> GroupOutcome<T> {
    let issue = GroupIssue {
        station,
        year,
        reason,
    };
    warn!("Skipping {issue}");
    GroupOutcome::Skipped(issue)
}

/// Turns an observation table into station-year series for the PET estimator.
///
/// Inline `Hémisphère`/`Latitude` columns are used as they are; without them, every
/// station must appear in `stations`. Groups without exactly the twelve months are
/// returned as [`GroupOutcome::Skipped`].
pub fn assemble_series(
    frame: &DataFrame,
    stations: &[Station],
) -> Result<Vec<GroupOutcome<StationYearSeries>>, DatasetError> {
    let mut frame = frame.clone();
    normalize_columns(&mut frame)?;

    let (mut records, inline_location) = read_records(&frame)?;
    if !inline_location {
        merge_stations(&mut records, stations)?;
    }
    let records = drop_duplicates(records);

    Ok(
        group_by_station_year(records, |record| (record.station.clone(), record.year.clone()))
            .into_iter()
            .map(|((station, year), records)| {
                match StationYearSeries::new(station.clone(), year.clone(), records) {
                    Ok(series) => GroupOutcome::Computed(series),
                    Err(reason) => skipped(station, year, reason),
                }
            })
            .collect(),
    )
}

/// Turns an annotated table (one carrying corrected PET) into series for the water balance.
pub fn assemble_balance_series(
    frame: &DataFrame,
) -> Result<Vec<GroupOutcome<BalanceSeries>>, DatasetError> {
    let mut frame = frame.clone();
    normalize_columns(&mut frame)?;
    let inputs = read_balance_inputs(&frame)?;
    Ok(group_balance_inputs(inputs))
}

pub(crate) fn group_balance_inputs(inputs: Vec<BalanceInput>) -> Vec<GroupOutcome<BalanceSeries>> {
    group_by_station_year(inputs, |input| (input.station.clone(), input.year.clone()))
        .into_iter()
        .map(|((station, year), months)| match BalanceSeries::new(months) {
            Ok(series) => GroupOutcome::Computed(series),
            Err(reason) => skipped(station, year, reason),
        })
        .collect()
}
