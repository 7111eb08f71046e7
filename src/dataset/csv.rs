//! Delimited-text import and export. Files are UTF-8 with a header row and `;` as
//! separator, so accented headers and the degree sign survive a round trip.

use crate::dataset::error::DatasetError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const CSV_SEPARATOR: u8 = b';';

fn read_with_separator(path: &Path, separator: u8) -> Result<DataFrame, DatasetError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| options.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))
}

/// Reads a `;`-separated file, retrying with `,` when only one column comes out.
///
/// Column types are inferred from every row, so a decimal appearing late in a column of
/// whole numbers still reads as a float.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, DatasetError> {
    let path = path.as_ref();
    let frame = read_with_separator(path, CSV_SEPARATOR)?;
    if frame.width() > 1 {
        return Ok(frame);
    }
    info!("Only one column in {:?} with ';', retrying with ','", path);
    read_with_separator(path, b',')
}

fn write_to<W: std::io::Write>(frame: &mut DataFrame, writer: &mut W) -> Result<(), DatasetError> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(CSV_SEPARATOR)
        .finish(frame)
        .map_err(DatasetError::CsvWrite)
}

/// Writes `frame` to `path`, replacing any existing file.
pub fn write_csv(frame: &mut DataFrame, path: impl AsRef<Path>) -> Result<PathBuf, DatasetError> {
    let path = path.as_ref().to_path_buf();
    let mut file = File::create(&path).map_err(|e| DatasetError::CsvCreate(path.clone(), e))?;
    write_to(frame, &mut file)?;
    info!("Wrote {} rows to {:?}", frame.height(), path);
    Ok(path)
}

/// Renders `frame` as the text of a CSV file.
pub fn to_csv_string(frame: &mut DataFrame) -> Result<String, DatasetError> {
    let mut buffer: Vec<u8> = Vec::new();
    write_to(frame, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::columns::{CORRECTED_PET, STATION, TEMPERATURE};

    #[test]
    fn csv_text_keeps_accents_and_separator() -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = df!(
            STATION => ["Besançon"],
            TEMPERATURE => [11.5],
            CORRECTED_PET => [Some(48.27)],
        )?;
        let text = to_csv_string(&mut frame)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Station;Température (°C);ETP corrigé (mm)")
        );
        assert_eq!(lines.next(), Some("Besançon;11.5;48.27"));
        Ok(())
    }

    #[test]
    fn files_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut frame = df!(
            STATION => ["Besançon", "Brest"],
            TEMPERATURE => [11.5, 12.0],
        )?;
        let path = write_csv(&mut frame, dir.path().join("out.csv"))?;
        let read = read_csv(&path)?;
        assert!(read.equals(&frame));
        Ok(())
    }

    #[test]
    fn comma_files_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("comma.csv");
        std::fs::write(&path, "Station,Latitude\nBrest,48.4\n")?;
        let read = read_csv(&path)?;
        assert_eq!(read.width(), 2);
        assert_eq!(read.column("Latitude")?.f64()?.get(0), Some(48.4));
        Ok(())
    }
}
