//! Failure construction and rendering.

use crate::compare::CompareOptions;
use crate::error::{ComparisonFailure, Mismatch};
use record_core::Record;
use std::fmt::Display;
use tracing::debug;

/// Build a failure from a caller message and a detected mismatch.
///
/// The mismatch's generated detail is appended to `message`, never
/// substituted for it. `expected` and `actual` are the string forms a diff
/// viewer should show side by side.
pub fn fail_comparing(
    message: &str,
    mismatch: Mismatch,
    expected: impl Display,
    actual: impl Display,
) -> ComparisonFailure {
    let full_message = join_message(message, &mismatch.detail());
    debug!("Comparison failed: {}", full_message);
    ComparisonFailure::new(
        full_message,
        expected.to_string(),
        actual.to_string(),
        mismatch,
    )
}

/// Build the failure for "exactly one side is absent".
///
/// The absent side is rendered with `options.null_display`.
pub fn absence(
    message: &str,
    expected: Option<String>,
    actual: Option<String>,
    options: &CompareOptions,
) -> ComparisonFailure {
    let expected_present = expected.is_some();
    fail_comparing(
        message,
        Mismatch::Absence { expected_present },
        expected.unwrap_or_else(|| options.null_display.clone()),
        actual.unwrap_or_else(|| options.null_display.clone()),
    )
}

/// Join a caller prefix and generated detail with a single space.
pub fn join_message(prefix: &str, detail: &str) -> String {
    match (prefix.is_empty(), detail.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => detail.to_string(),
        (false, false) => format!("{prefix} {detail}"),
    }
}

/// Render a collection as `[a, b, c]`.
pub fn render_list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let rendered: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

/// Render a record as `{A=1, B=x}` in field-name order, normalizing each
/// value under `options`.
pub fn render_record(record: &Record, options: &CompareOptions) -> String {
    let fields: Vec<String> = record
        .iter()
        .map(|(name, value)| {
            let shown = options
                .normalize
                .normalize(value)
                .display_with(&options.null_display);
            format!("{name}={shown}")
        })
        .collect();
    format!("{{{}}}", fields.join(", "))
}

/// Render several records as `[{..}, {..}]`.
pub fn render_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    options: &CompareOptions,
) -> String {
    render_list(records.into_iter().map(|r| render_record(r, options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_core::Value;

    #[test]
    fn test_caller_message_is_kept() {
        let failure = fail_comparing(
            "checking users",
            Mismatch::Size {
                expected: 1,
                actual: 0,
            },
            "[a]",
            "[]",
        );
        assert_eq!(
            failure.message(),
            "checking users size differs. expected size=[1], actual size=[0]"
        );
        assert_eq!(failure.expected(), "[a]");
        assert_eq!(failure.actual(), "[]");
    }

    #[test]
    fn test_empty_detail_keeps_prefix_only() {
        let failure = fail_comparing("msg", Mismatch::Value, "1", "2");
        assert_eq!(failure.message(), "msg");
        assert_eq!(failure.to_string(), "msg expected:<1> but was:<2>");
    }

    #[test]
    fn test_absence_renders_null_display() {
        let options = CompareOptions {
            null_display: "<none>".to_string(),
            ..Default::default()
        };
        let failure = absence("", None, Some("[x]".to_string()), &options);
        assert_eq!(failure.expected(), "<none>");
        assert_eq!(failure.actual(), "[x]");
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Absence {
                expected_present: false
            }
        );
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(["foo", "bar"]), "[foo, bar]");
        assert_eq!(render_list(Vec::<String>::new()), "[]");
    }

    #[test]
    fn test_render_record_uses_options() {
        let record = Record::builder()
            .field("B", Value::Null)
            .field("A", Value::Bytes(vec![0xab]))
            .build();
        let options = CompareOptions {
            null_display: "NULL".to_string(),
            ..Default::default()
        };
        assert_eq!(render_record(&record, &options), "{A=AB, B=NULL}");
    }
}
