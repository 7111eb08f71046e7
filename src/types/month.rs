//! Calendar months and the normalizer that maps free-form month names onto the
//! twelve canonical French labels used throughout the datasets.

use crate::types::error::UnknownMonth;
use crate::utils::{capitalize, fold_label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month. Ordering follows the calendar, January first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The canonical label, as it appears in the `Mois` column and in the correction tables.
    pub fn label(self) -> &'static str {
        match self {
            Month::January => "Janvier",
            Month::February => "Février",
            Month::March => "Mars",
            Month::April => "Avril",
            Month::May => "Mai",
            Month::June => "Juin",
            Month::July => "Juillet",
            Month::August => "Août",
            Month::September => "Septembre",
            Month::October => "Octobre",
            Month::November => "Novembre",
            Month::December => "Décembre",
        }
    }

    /// Zero-based calendar index (January is 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Month> {
        Self::ALL.get(index).copied()
    }

    /// Exact match against the canonical labels. Use [`normalize_month`] first for free-form input.
    pub fn from_label(label: &str) -> Option<Month> {
        Self::ALL.into_iter().find(|month| month.label() == label)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = UnknownMonth;

    /// Parses any spelling accepted by [`normalize_month`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_month(s);
        Month::from_label(&normalized).ok_or(UnknownMonth(normalized))
    }
}

/// Maps a month name onto its canonical label, ignoring case, surrounding whitespace
/// and missing or extra accents ("fevrier", "FÉVRIER" and "Février" all give "Février").
///
/// Labels that are not month names are passed through capitalized. Callers that need a
/// [`Month`] must still check the result with [`Month::from_label`].
pub fn normalize_month(label: &str) -> String {
    let folded = fold_label(label);
    Month::ALL
        .into_iter()
        .find(|month| fold_label(month.label()) == folded)
        .map(|month| month.label().to_string())
        .unwrap_or_else(|| capitalize(label.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_are_fixed_points() {
        for month in Month::ALL {
            assert_eq!(normalize_month(month.label()), month.label());
        }
    }

    #[test]
    fn normalization_ignores_case_and_accents() {
        for spelling in ["fevrier", "Février", "FÉVRIER", " février ", "FEVRIER"] {
            assert_eq!(normalize_month(spelling), "Février", "spelling {spelling:?}");
        }
        assert_eq!(normalize_month("aout"), "Août");
        assert_eq!(normalize_month("DECEMBRE"), "Décembre");
        assert_eq!(normalize_month("janvier"), "Janvier");
    }

    #[test]
    fn unknown_labels_are_capitalized_and_passed_through() {
        assert_eq!(normalize_month("  jANUARY"), "January");
        assert_eq!(Month::from_label(&normalize_month("january")), None);
    }

    #[test]
    fn index_follows_calendar_order() {
        for (i, month) in Month::ALL.into_iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(Month::from_index(i), Some(month));
        }
        assert_eq!(Month::from_index(12), None);
        assert!(Month::January < Month::December);
    }

    #[test]
    fn from_str_reports_the_normalized_label() {
        assert_eq!("mai".parse::<Month>(), Ok(Month::May));
        assert_eq!(
            "smarch".parse::<Month>(),
            Err(UnknownMonth("Smarch".to_string()))
        );
    }
}
