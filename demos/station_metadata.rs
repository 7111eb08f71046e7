//! Reads observations and station metadata from CSV files, then writes both result tables.

use std::fs;
use thornthwaite::{read_csv, write_csv, Thornthwaite};

const OBSERVATIONS: &str = "\
station;annee;mois;temperature;pluie
Durban;2019;Janvier;24.6;134
Durban;2019;Fevrier;24.9;113
Durban;2019;Mars;24.3;120
Durban;2019;Avril;22.4;73
Durban;2019;Mai;20.2;59
Durban;2019;Juin;18.1;28
Durban;2019;Juillet;17.9;39
Durban;2019;Aout;18.6;62
Durban;2019;Septembre;19.8;73
Durban;2019;Octobre;20.8;98
Durban;2019;Novembre;22.2;108
Durban;2019;Decembre;23.8;120
";

const STATIONS: &str = "\
Station;Hemisphere;Latitude
Durban;Sud;29.9
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let observations_path = dir.path().join("observations.csv");
    let stations_path = dir.path().join("stations.csv");
    fs::write(&observations_path, OBSERVATIONS)?;
    fs::write(&stations_path, STATIONS)?;

    let calculator = Thornthwaite::builder()
        .rfu_max(150.0)
        .station_metadata(read_csv(&stations_path)?)
        .build()?;

    let observations = read_csv(&observations_path)?;
    let mut pet = calculator.compute_pet(&observations)?;
    let mut balance = calculator.compute_effective_rainfall(&pet.frame)?;

    for issue in &balance.diagnostics.row_issues {
        println!("warning: {issue}");
    }

    let pet_path = write_csv(&mut pet.frame, dir.path().join("etp.csv"))?;
    let balance_path = write_csv(&mut balance.frame, dir.path().join("pluie_efficace.csv"))?;
    println!("{}", fs::read_to_string(pet_path)?);
    println!("{}", fs::read_to_string(balance_path)?);

    Ok(())
}
