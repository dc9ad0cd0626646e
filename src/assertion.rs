//! Panicking assertions for tests.
//!
//! Each function runs the matching `record_verify` comparison and panics
//! with the failure's `Display` form, `"<message> <detail> expected:<..>
//! but was:<..>"`, reported at the caller's location.

use crate::config::AssertConfig;
use record_core::{Record, Table, Value};
use record_verify::{CompareOptions, ComparisonFailure, Equivalence, Mismatch, NativeEq};
use std::fmt::Display;

/// Assertions bound to a set of comparison options.
///
/// The free functions in this module use [`Assertions::default`].
#[derive(Debug, Clone, Default)]
pub struct Assertions {
    options: CompareOptions,
}

impl Assertions {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &AssertConfig) -> Self {
        Self::new(config.options.clone())
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Assert two tables hold the same rows, paired by primary key.
    #[track_caller]
    pub fn table_equals(&self, message: &str, expected: &Table, actual: &Table) {
        check(record_verify::compare_tables_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }

    /// Assert every expected table equals the actual table of the same name.
    #[track_caller]
    pub fn tables_equal(&self, message: &str, expected: &[Table], actual: &[Table]) {
        check(record_verify::compare_table_sets_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }

    /// Assert two record collections are equal ignoring order, with
    /// values compared in normalized form.
    #[track_caller]
    pub fn records_equal_ignoring_order(
        &self,
        message: &str,
        expected: &[Record],
        actual: &[Record],
    ) {
        check(record_verify::compare_records_ignoring_order_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }

    /// Assert two record lists are equal in order.
    #[track_caller]
    pub fn record_list_equals(&self, message: &str, expected: &[Record], actual: &[Record]) {
        check(record_verify::compare_record_lists_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }

    /// Assert two records have the same fields with equal normalized values.
    #[track_caller]
    pub fn record_equals(&self, message: &str, expected: &Record, actual: &Record) {
        check(record_verify::compare_records_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }

    /// Assert two values are equal as normalized strings.
    #[track_caller]
    pub fn equals_as_string(&self, message: &str, expected: &Value, actual: &Value) {
        check(record_verify::compare_values_with_options(
            &self.options,
            message,
            expected,
            actual,
        ));
    }
}

/// Assert two tables hold the same rows, paired by primary key.
#[track_caller]
pub fn assert_table_equals(message: &str, expected: &Table, actual: &Table) {
    Assertions::default().table_equals(message, expected, actual);
}

/// Assert every expected table equals the actual table of the same name.
#[track_caller]
pub fn assert_tables_equal(message: &str, expected: &[Table], actual: &[Table]) {
    Assertions::default().tables_equal(message, expected, actual);
}

/// Assert two collections hold the same elements ignoring order.
///
/// Elements are compared with `==`.
#[track_caller]
pub fn assert_equals_ignoring_order<E, A>(message: &str, expected: &[E], actual: &[A])
where
    E: Display + PartialEq<A>,
    A: Display,
{
    check(record_verify::compare_multiset(expected, actual, &NativeEq, message));
}

/// [`assert_equals_ignoring_order`] with a caller-supplied equivalence.
///
/// The predicate must be an equivalence relation over the elements.
#[track_caller]
pub fn assert_equals_ignoring_order_by<E, A, P>(
    message: &str,
    expected: &[E],
    actual: &[A],
    predicate: &P,
) where
    E: Display,
    A: Display,
    P: Equivalence<E, A> + ?Sized,
{
    check(record_verify::compare_multiset(expected, actual, predicate, message));
}

/// Assert two record collections are equal ignoring order.
#[track_caller]
pub fn assert_records_equal_ignoring_order(
    message: &str,
    expected: &[Record],
    actual: &[Record],
) {
    Assertions::default().records_equal_ignoring_order(message, expected, actual);
}

/// Assert two record lists are equal in order.
#[track_caller]
pub fn assert_record_list_equals(message: &str, expected: &[Record], actual: &[Record]) {
    Assertions::default().record_list_equals(message, expected, actual);
}

/// Assert two records are equal field by field.
#[track_caller]
pub fn assert_record_equals(message: &str, expected: &Record, actual: &Record) {
    Assertions::default().record_equals(message, expected, actual);
}

/// Assert two values are equal as normalized strings.
#[track_caller]
pub fn assert_equals_as_string(message: &str, expected: &Value, actual: &Value) {
    Assertions::default().equals_as_string(message, expected, actual);
}

/// Fail unconditionally with an expected/actual pair.
#[track_caller]
pub fn fail_comparing(message: &str, expected: impl Display, actual: impl Display) -> ! {
    fail(record_verify::fail_comparing(message, Mismatch::Value, expected, actual))
}

#[track_caller]
fn check(result: Result<(), ComparisonFailure>) {
    if let Err(failure) = result {
        fail(failure);
    }
}

#[track_caller]
fn fail(failure: ComparisonFailure) -> ! {
    tracing::error!("{}", failure);
    panic!("{failure}");
}
