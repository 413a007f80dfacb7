use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived, irreversible effect of the chosen configuration, shown to
/// the user before deployment is permitted. Order follows rule evaluation
/// order; the caller groups by severity for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Consequence {
    pub id: &'static str,
    pub severity: Severity,
    pub title: String,
    pub explanation: String,
    pub tooltip: String,
}

/// Contextual advice keyed off the same facts, with no severity class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioHint {
    pub condition: &'static str,
    pub hint: String,
}
