//! Attribute filter state read by the style resolver.

use std::fmt;
use std::str::FromStr;

use accident_map_accident_models::{AccidentRecord, AccidentSeverity, AccidentType};

/// One dropdown's selection: everything, or a single vocabulary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    /// No filtering on this attribute.
    All,
    /// Only records whose raw attribute string equals this value's
    /// canonical string.
    Only(T),
}

impl<T: AsRef<str>> Selection<T> {
    /// Whether a record's raw attribute string passes this selection.
    ///
    /// A raw value outside the canonical vocabulary never matches a
    /// specific selection but always passes [`Selection::All`].
    pub fn admits(&self, raw: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => value.as_ref() == raw,
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: AsRef<str>> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => f.write_str(value.as_ref()),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Self::All)
        } else {
            T::from_str(s).map(Self::Only)
        }
    }
}

/// The two independently selectable filters, owned by the application
/// context and read by the style resolver on every render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Accident type selection.
    pub selected_type: Selection<AccidentType>,
    /// Severity selection.
    pub selected_severity: Selection<AccidentSeverity>,
}

impl FilterState {
    /// Both filters set to `All`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected_type: Selection::All,
            selected_severity: Selection::All,
        }
    }

    /// Whether a record passes both filters. Both predicates must pass
    /// (logical AND).
    #[must_use]
    pub fn matches(&self, record: &AccidentRecord) -> bool {
        self.selected_type.admits(&record.accident_type)
            && self.selected_severity.admits(&record.severity)
    }
}
