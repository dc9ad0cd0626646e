//! Comparison failure types.

use std::fmt;
use thiserror::Error;

/// What kind of difference a comparison detected.
///
/// Every variant is an assertion failure that should abort the current test
/// case; none of them is meant to be recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Exactly one side is absent.
    Absence {
        /// Whether the expected side was the one present.
        expected_present: bool,
    },

    /// Collections have different cardinalities.
    Size { expected: usize, actual: usize },

    /// Same cardinality, but no pairing exists. Carries the elements left
    /// unmatched on each side, rendered.
    Content {
        leftover_expected: Vec<String>,
        leftover_actual: Vec<String>,
    },

    /// An expected row's primary key has no counterpart in the actual table.
    RowNotFound {
        table: String,
        pk: String,
        /// 1-based position of the expected row.
        row: usize,
    },

    /// An actual row was never claimed by any expected row.
    UnexpectedRow { table: String, pk: String },

    /// A matched pair of rows differs in one column.
    ColumnValue {
        table: String,
        /// 1-based position of the expected row.
        row: usize,
        column: String,
    },

    /// Two values or records differ when compared as normalized text.
    Value,
}

impl Mismatch {
    /// Generated detail text appended to the caller's message.
    pub fn detail(&self) -> String {
        match self {
            Mismatch::Absence { expected_present } => {
                let (present, absent) = if *expected_present {
                    ("expected", "actual")
                } else {
                    ("actual", "expected")
                };
                format!("{absent} is absent while {present} is present.")
            }
            Mismatch::Size { expected, actual } => {
                format!("size differs. expected size=[{expected}], actual size=[{actual}]")
            }
            Mismatch::Content {
                leftover_expected,
                leftover_actual,
            } => format!(
                "different element(s) found. expected has [{}], actual has [{}].",
                leftover_expected.join(", "),
                leftover_actual.join(", ")
            ),
            Mismatch::RowNotFound { table, pk, row } => format!(
                "the table of [{table}] is expected to have a record whose PK is [{pk}], \
                 but there is no such record in the table. row number=[{row}]"
            ),
            Mismatch::UnexpectedRow { table, pk } => {
                format!("an unexpected record is included in the table of [{table}]. PK=[{pk}]")
            }
            Mismatch::ColumnValue { table, row, column } => {
                format!("table={table} line={row} column={column}")
            }
            Mismatch::Value => String::new(),
        }
    }
}

/// A failed comparison.
///
/// Exposes the full message (caller prefix followed by the generated
/// detail) and the string forms of the expected and actual sides, so a
/// diff viewer can render them side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFailure {
    message: String,
    expected: String,
    actual: String,
    mismatch: Mismatch,
}

impl fmt::Display for ComparisonFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{} ", self.message)?;
        }
        write!(f, "expected:<{}> but was:<{}>", self.expected, self.actual)
    }
}

impl std::error::Error for ComparisonFailure {}

impl ComparisonFailure {
    pub(crate) fn new(
        message: String,
        expected: String,
        actual: String,
        mismatch: Mismatch,
    ) -> Self {
        Self {
            message,
            expected,
            actual,
            mismatch,
        }
    }

    /// Caller prefix followed by the generated detail.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// String form of the expected side.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// String form of the actual side.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// The kind of difference detected.
    pub fn mismatch(&self) -> &Mismatch {
        &self.mismatch
    }
}

/// A predicate that is not an equivalence relation over some inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquivalenceViolation {
    #[error("predicate is not reflexive: {0} is not equivalent to itself")]
    NotReflexive(String),

    #[error("predicate is not symmetric: {0} ~ {1} but not {1} ~ {0}")]
    NotSymmetric(String, String),

    #[error("predicate is not transitive: {0} ~ {1} and {1} ~ {2} but not {0} ~ {2}")]
    NotTransitive(String, String, String),
}
