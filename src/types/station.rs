//! Station metadata: the hemisphere and latitude used to pick correction coefficients.

use crate::types::error::StationError;
use crate::utils::fold_label;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Highest latitude (in degrees, sign-less) a station may be configured with.
pub const MAX_LATITUDE: f64 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The label written to the `Hémisphère` column.
    pub fn label(self) -> &'static str {
        match self {
            Hemisphere::North => "Nord",
            Hemisphere::South => "Sud",
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Hemisphere {
    type Err = StationError;

    /// Accepts the French and English names and their initials, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_label(s).as_str() {
            "nord" | "north" | "n" => Ok(Hemisphere::North),
            "sud" | "south" | "s" => Ok(Hemisphere::South),
            _ => Err(StationError::UnknownHemisphere(s.trim().to_string())),
        }
    }
}

/// A weather station. The name is the join key between observations and metadata;
/// the latitude is sign-less, direction being carried by the hemisphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub hemisphere: Hemisphere,
    pub latitude: f64,
}

impl Station {
    /// Creates a station, trimming the name and checking the latitude lies in 0-60 degrees.
    pub fn new(
        name: impl Into<String>,
        hemisphere: Hemisphere,
        latitude: f64,
    ) -> Result<Self, StationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(StationError::EmptyName);
        }
        if !(0.0..=MAX_LATITUDE).contains(&latitude) {
            return Err(StationError::LatitudeOutOfRange {
                station: name,
                latitude,
            });
        }
        Ok(Self {
            name,
            hemisphere,
            latitude,
        })
    }
}
