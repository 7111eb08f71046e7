use polars::prelude::*;
use std::env;
use thornthwaite::columns::{MONTH, RAINFALL, STATION, TEMPERATURE, YEAR};
use thornthwaite::{Hemisphere, Month, Station, Thornthwaite};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    configure_polars_display();

    let months: Vec<&str> = Month::ALL.iter().map(|m| m.label()).collect();
    let observations = df!(
        STATION => vec!["Rabat"; 12],
        YEAR => vec!["2015"; 12],
        MONTH => months,
        TEMPERATURE => [12.7, 13.3, 14.8, 16.1, 18.5, 21.0, 23.1, 23.3, 22.0, 19.5, 16.3, 13.6],
        RAINFALL => [77.0, 74.0, 60.0, 51.0, 20.0, 5.0, 1.0, 1.0, 7.0, 45.0, 86.0, 100.0],
    )?;

    let calculator = Thornthwaite::builder()
        .rfu_max(100.0)
        .stations(vec![Station::new("Rabat", Hemisphere::North, 34.0)?])
        .build()?;

    let pet = calculator.compute_pet(&observations)?;
    println!("{}", pet.summary);
    println!("{}", pet.frame);

    let balance = calculator.compute_effective_rainfall(&pet.frame)?;
    println!("{}", balance.frame);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "24");
}
