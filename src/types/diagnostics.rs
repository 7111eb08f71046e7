//! Soft failures: problems that skip a group or blank a row without aborting the batch.

use crate::correction::CoefficientLookupError;
use crate::types::error::SeriesError;
use crate::types::month::Month;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Result of processing one station-year group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome<T> {
    Computed(T),
    Skipped(GroupIssue),
}

/// A station-year group that was left out of the results.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupIssue {
    pub station: String,
    pub year: String,
    pub reason: SeriesError,
}

impl Display for GroupIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.station, self.year, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowIssueKind {
    /// No correction coefficient, so K and corrected PET are blank.
    MissingCoefficient(CoefficientLookupError),
    /// No corrected PET to balance against; ETR and effective rainfall are blank.
    MissingCorrectedPet,
}

/// A row kept in the results with some derived values left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct RowIssue {
    pub station: String,
    pub year: String,
    pub month: Month,
    pub kind: RowIssueKind,
}

impl Display for RowIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}: ", self.station, self.year, self.month)?;
        match &self.kind {
            RowIssueKind::MissingCoefficient(e) => write!(f, "no correction coefficient ({e})"),
            RowIssueKind::MissingCorrectedPet => f.write_str("no corrected PET"),
        }
    }
}

/// Everything that was skipped or blanked during a computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub skipped_groups: Vec<GroupIssue>,
    pub row_issues: Vec<RowIssue>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.skipped_groups.is_empty() && self.row_issues.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.skipped_groups.extend(other.skipped_groups);
        self.row_issues.extend(other.row_issues);
    }
}
