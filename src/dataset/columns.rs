//! Column names of the input and output tables, and the header normalization that
//! maps user spellings onto them.

use crate::dataset::error::DatasetError;
use crate::utils::fold_label;
use polars::prelude::*;

pub const STATION: &str = "Station";
pub const YEAR: &str = "Année";
pub const MONTH: &str = "Mois";
pub const TEMPERATURE: &str = "Température (°C)";
pub const RAINFALL: &str = "Pluie (mm)";
pub const HEMISPHERE: &str = "Hémisphère";
pub const LATITUDE: &str = "Latitude";

pub const SUB_INDEX: &str = "i";
pub const PET: &str = "ETP (mm)";
pub const COEFFICIENT: &str = "K";
pub const CORRECTED_PET: &str = "ETP corrigé (mm)";

pub const ETP_USED: &str = "ETP utilisé (mm)";
pub const RESERVOIR: &str = "RFU (mm)";
pub const ACTUAL_ET: &str = "ETR (mm)";
pub const EFFECTIVE_RAINFALL: &str = "Pluie efficace (mm)";

pub const HEAT_INDEX: &str = "I";
pub const EXPONENT: &str = "a";

/// Columns every observation table must provide.
pub const REQUIRED_OBSERVATION_COLUMNS: [&str; 5] = [STATION, YEAR, MONTH, TEMPERATURE, RAINFALL];

/// Columns of the annotated observation table that are produced from typed rows. Any
/// other input column is carried through unchanged.
pub const PET_FRAME_COLUMNS: [&str; 11] = [
    STATION,
    YEAR,
    MONTH,
    TEMPERATURE,
    RAINFALL,
    HEMISPHERE,
    LATITUDE,
    SUB_INDEX,
    PET,
    COEFFICIENT,
    CORRECTED_PET,
];

/// Columns a station metadata table must provide.
pub const REQUIRED_STATION_COLUMNS: [&str; 3] = [STATION, HEMISPHERE, LATITUDE];

/// Folded header spelling → canonical column name.
const ALIASES: &[(&str, &str)] = &[
    ("station", STATION),
    ("annee", YEAR),
    ("year", YEAR),
    ("mois", MONTH),
    ("month", MONTH),
    ("temperature (°c)", TEMPERATURE),
    ("temperature (c)", TEMPERATURE),
    ("temperature", TEMPERATURE),
    ("pluie (mm)", RAINFALL),
    ("pluie", RAINFALL),
    ("precipitation (mm)", RAINFALL),
    ("precipitation", RAINFALL),
    ("rainfall (mm)", RAINFALL),
    ("rainfall", RAINFALL),
    ("hemisphere", HEMISPHERE),
    ("latitude", LATITUDE),
    ("etp (mm)", PET),
    ("k", COEFFICIENT),
    ("etp corrige (mm)", CORRECTED_PET),
    ("etp utilise (mm)", ETP_USED),
    ("rfu (mm)", RESERVOIR),
    ("etr (mm)", ACTUAL_ET),
    ("pluie efficace (mm)", EFFECTIVE_RAINFALL),
];

/// The canonical name for a header, ignoring case, accents and surrounding whitespace
/// (except for the sub-index `i`).
pub fn canonical_name(header: &str) -> Option<&'static str> {
    // `i` is case-sensitive: `I` is the annual heat index.
    if header.trim() == SUB_INDEX {
        return Some(SUB_INDEX);
    }
    let folded = fold_label(header);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| *canonical)
}

/// Renames recognised headers to their canonical names. Unknown headers are left alone,
/// and a header is not renamed if the canonical column already exists.
pub fn normalize_columns(frame: &mut DataFrame) -> Result<(), DatasetError> {
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let Some(canonical) = canonical_name(&name) else {
            continue;
        };
        if name != canonical && frame.get_column_index(canonical).is_none() {
            frame.rename(&name, canonical.into())?;
        }
    }
    Ok(())
}

pub fn has_columns(frame: &DataFrame, names: &[&str]) -> bool {
    names
        .iter()
        .all(|name| frame.get_column_index(name).is_some())
}

/// Fails with the list of `names` absent from `frame`.
pub fn require_columns(frame: &DataFrame, names: &[&str]) -> Result<(), DatasetError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| frame.get_column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_ignore_case_and_accents() {
        assert_eq!(canonical_name(" Température (°c) "), Some(TEMPERATURE));
        assert_eq!(canonical_name("TEMPERATURE"), Some(TEMPERATURE));
        assert_eq!(canonical_name("Annee"), Some(YEAR));
        assert_eq!(canonical_name("mois"), Some(MONTH));
        assert_eq!(canonical_name("Precipitation"), Some(RAINFALL));
        assert_eq!(canonical_name("Etp corrigé (mm)"), Some(CORRECTED_PET));
        assert_eq!(canonical_name("Altitude"), None);
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        for (_, canonical) in ALIASES {
            assert_eq!(canonical_name(canonical), Some(*canonical));
        }
    }

    #[test]
    fn heat_index_is_not_taken_for_the_sub_index() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(canonical_name(" i "), Some(SUB_INDEX));
        assert_eq!(canonical_name(HEAT_INDEX), None);

        let mut frame = df!(HEAT_INDEX => [62.4])?;
        normalize_columns(&mut frame)?;
        assert!(frame.get_column_index(HEAT_INDEX).is_some());
        assert!(frame.get_column_index(SUB_INDEX).is_none());

        let mut both = df!(SUB_INDEX => [4.1], HEAT_INDEX => [62.4])?;
        normalize_columns(&mut both)?;
        assert_eq!(both.column(SUB_INDEX)?.f64()?.get(0), Some(4.1));
        assert_eq!(both.column(HEAT_INDEX)?.f64()?.get(0), Some(62.4));
        Ok(())
    }

    #[test]
    fn normalize_renames_known_headers() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = df!(
            "station" => ["A"],
            "Annee" => ["2020"],
            "mois" => ["Janvier"],
            "Temperature" => [12.0],
            "Pluie" => [30.0],
            "Altitude" => [250.0],
        )?;
        normalize_columns(&mut frame)?;
        require_columns(&frame, &REQUIRED_OBSERVATION_COLUMNS)?;
        assert!(frame.get_column_index("Altitude").is_some());
        Ok(())
    }

    #[test]
    fn normalize_keeps_existing_canonical_columns() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = df!(
            "Pluie (mm)" => [30.0],
            "Precipitation" => [99.0],
        )?;
        normalize_columns(&mut frame)?;
        assert_eq!(frame.column(RAINFALL)?.f64()?.get(0), Some(30.0));
        assert!(frame.get_column_index("Precipitation").is_some());
        Ok(())
    }

    #[test]
    fn missing_columns_are_listed() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("Station" => ["A"], "Mois" => ["Mai"])?;
        match require_columns(&frame, &REQUIRED_OBSERVATION_COLUMNS) {
            Err(DatasetError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![YEAR, TEMPERATURE, RAINFALL]);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
        Ok(())
    }
}
