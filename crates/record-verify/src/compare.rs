//! Value, record and ordered record-list comparison.

use crate::error::{ComparisonFailure, Mismatch};
use crate::multiset::compare_multiset_rendered;
use crate::predicate::{Equivalence, NormalizedEq};
use crate::report::{absence, fail_comparing, join_message, render_record, render_records};
use record_core::{NormalizeOptions, Normalized, Record, Value, NULL_DISPLAY};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

fn default_null_display() -> String {
    NULL_DISPLAY.to_string()
}

/// Options for configuring comparison behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// How values are normalized before comparison.
    #[serde(flatten)]
    pub normalize: NormalizeOptions,

    /// Text shown for a null in diagnostics. Does not affect equality: a
    /// null never equals any text, including this one.
    #[serde(default = "default_null_display")]
    pub null_display: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            null_display: default_null_display(),
        }
    }
}

impl CompareOptions {
    /// Normalize a value under these options.
    pub fn normalize(&self, value: &Value) -> Normalized {
        self.normalize.normalize(value)
    }

    /// Normalize a value and render it for a diagnostic.
    pub fn display(&self, value: &Value) -> String {
        self.normalize(value).display_with(&self.null_display)
    }
}

/// Compare two values by their normalized string forms.
pub fn compare_values(
    message: &str,
    expected: &Value,
    actual: &Value,
) -> Result<(), ComparisonFailure> {
    compare_values_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_values`] with explicit options.
pub fn compare_values_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &Value,
    actual: &Value,
) -> Result<(), ComparisonFailure> {
    trace!(
        "Comparing {} value with {} value",
        expected.type_name(),
        actual.type_name()
    );
    let e = options.normalize(expected);
    let a = options.normalize(actual);
    if e == a {
        return Ok(());
    }
    Err(fail_comparing(
        message,
        Mismatch::Value,
        e.display_with(&options.null_display),
        a.display_with(&options.null_display),
    ))
}

/// Compare two records field by field as normalized strings.
///
/// The records must have the same field names and every field must
/// normalize identically. On failure both records are rendered in
/// field-name order.
pub fn compare_records(
    message: &str,
    expected: &Record,
    actual: &Record,
) -> Result<(), ComparisonFailure> {
    compare_records_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_records`] with explicit options.
pub fn compare_records_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &Record,
    actual: &Record,
) -> Result<(), ComparisonFailure> {
    if NormalizedEq::new(options.normalize).is_equivalent(expected, actual) {
        return Ok(());
    }
    Err(fail_comparing(
        message,
        Mismatch::Value,
        render_record(expected, options),
        render_record(actual, options),
    ))
}

/// Compare two record lists in order.
///
/// Lists of different length fail with a size mismatch. Otherwise rows are
/// compared pairwise and the first differing row fails, its 1-based
/// position appended to `message` as `line no=[n]`.
pub fn compare_record_lists(
    message: &str,
    expected: &[Record],
    actual: &[Record],
) -> Result<(), ComparisonFailure> {
    compare_record_lists_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_record_lists`] with explicit options.
pub fn compare_record_lists_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &[Record],
    actual: &[Record],
) -> Result<(), ComparisonFailure> {
    if expected.len() != actual.len() {
        return Err(fail_comparing(
            message,
            Mismatch::Size {
                expected: expected.len(),
                actual: actual.len(),
            },
            render_records(expected, options),
            render_records(actual, options),
        ));
    }

    for (idx, (e, a)) in expected.iter().zip(actual).enumerate() {
        let line_message = join_message(message, &format!("line no=[{}]", idx + 1));
        compare_records_with_options(options, &line_message, e, a)?;
    }

    debug!("Record lists matched: {} rows", expected.len());
    Ok(())
}

/// Compare two record collections ignoring order.
///
/// Records are paired as in [`crate::compare_multiset`] using
/// [`NormalizedEq`], and failures render every record in the normalized
/// form that was compared.
pub fn compare_records_ignoring_order(
    message: &str,
    expected: &[Record],
    actual: &[Record],
) -> Result<(), ComparisonFailure> {
    compare_records_ignoring_order_with_options(
        &CompareOptions::default(),
        message,
        expected,
        actual,
    )
}

/// [`compare_records_ignoring_order`] with explicit options.
pub fn compare_records_ignoring_order_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &[Record],
    actual: &[Record],
) -> Result<(), ComparisonFailure> {
    let render = |record: &Record| render_record(record, options);
    compare_multiset_rendered(
        expected,
        actual,
        &NormalizedEq::new(options.normalize),
        message,
        render,
        render,
    )
}

/// [`compare_record_lists`] where either side may be absent.
pub fn compare_optional_record_lists(
    message: &str,
    expected: Option<&[Record]>,
    actual: Option<&[Record]>,
) -> Result<(), ComparisonFailure> {
    compare_optional_record_lists_with_options(
        &CompareOptions::default(),
        message,
        expected,
        actual,
    )
}

/// [`compare_optional_record_lists`] with explicit options.
pub fn compare_optional_record_lists_with_options(
    options: &CompareOptions,
    message: &str,
    expected: Option<&[Record]>,
    actual: Option<&[Record]>,
) -> Result<(), ComparisonFailure> {
    match (expected, actual) {
        (None, None) => Ok(()),
        (Some(e), Some(a)) => compare_record_lists_with_options(options, message, e, a),
        (e, a) => Err(absence(
            message,
            e.map(|rows| render_records(rows, options)),
            a.map(|rows| render_records(rows, options)),
            options,
        )),
    }
}
