use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Record type produced by extraction.
///
/// Three canonical entities carry a data-dictionary contract;
/// `Unclassified` marks envelopes no template rule matched, which still
/// produce a record so nothing is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    ShiftNote,
    IncidentReport,
    IncidentInvestigation,
    Unclassified,
}

impl EntityKind {
    /// Returns the identifier used in catalogue files and record output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ShiftNote => "shift_note",
            EntityKind::IncidentReport => "incident_report",
            EntityKind::IncidentInvestigation => "incident_investigation",
            EntityKind::Unclassified => "unclassified",
        }
    }

    /// Returns true for the three dictionary-backed entities.
    pub fn is_canonical(&self) -> bool {
        !matches!(self, EntityKind::Unclassified)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "shift_note" => Ok(EntityKind::ShiftNote),
            "incident_report" => Ok(EntityKind::IncidentReport),
            "incident_investigation" => Ok(EntityKind::IncidentInvestigation),
            "unclassified" => Ok(EntityKind::Unclassified),
            other => Err(ModelError::UnknownEntity(other.to_string())),
        }
    }
}
