//! Keyed row matching for tables.
//!
//! Rows are paired by primary key, then every declared column of each pair
//! is compared in normalized form. The expected table decides which columns
//! and keys are checked.
//!
//! When several actual rows share a key, only the first of them (in actual
//! row order) can ever be paired. The others are left unclaimed and, unless
//! a later expected row has a different key that matches them, are reported
//! as unexpected. Duplicate keys are not otherwise diagnosed.

use crate::compare::CompareOptions;
use crate::error::{ComparisonFailure, Mismatch};
use crate::report::{absence, fail_comparing, join_message, render_records};
use record_core::Table;
use tracing::{debug, trace};

/// Compare two tables row by row, pairing rows by primary key.
pub fn compare_tables(
    message: &str,
    expected: &Table,
    actual: &Table,
) -> Result<(), ComparisonFailure> {
    compare_tables_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_tables`] with explicit options.
pub fn compare_tables_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &Table,
    actual: &Table,
) -> Result<(), ComparisonFailure> {
    if std::ptr::eq(expected, actual) {
        trace!("Table {} compared against itself", expected.name());
        return Ok(());
    }

    debug!(
        "Comparing table {}: {} expected rows, {} actual rows",
        expected.name(),
        expected.len(),
        actual.len()
    );

    let mut matched = vec![false; actual.len()];

    for row in 0..expected.len() {
        let Some(actual_row) = find_by_key(options, expected, row, actual) else {
            return Err(fail_comparing(
                message,
                Mismatch::RowNotFound {
                    table: expected.name().to_string(),
                    pk: expected.pk_values_with(row, &options.normalize, &options.null_display),
                    row: row + 1,
                },
                render_records(expected.rows(), options),
                render_records(actual.rows(), options),
            ));
        };
        matched[actual_row] = true;
        trace!(
            "Expected row {} of {} paired with actual row {}",
            row + 1,
            expected.name(),
            actual_row + 1
        );

        for column in expected.columns() {
            let e = options.normalize(expected.value(row, column));
            let a = options.normalize(actual.value(actual_row, column));
            if e != a {
                return Err(fail_comparing(
                    message,
                    Mismatch::ColumnValue {
                        table: expected.name().to_string(),
                        row: row + 1,
                        column: column.clone(),
                    },
                    e.display_with(&options.null_display),
                    a.display_with(&options.null_display),
                ));
            }
        }
    }

    if let Some(unclaimed) = matched.iter().position(|m| !m) {
        return Err(fail_comparing(
            message,
            Mismatch::UnexpectedRow {
                table: actual.name().to_string(),
                pk: actual.pk_values_with(unclaimed, &options.normalize, &options.null_display),
            },
            render_records(expected.rows(), options),
            render_records(actual.rows(), options),
        ));
    }

    debug!("Table {} matched: {} rows", expected.name(), expected.len());
    Ok(())
}

/// [`compare_tables`] where either side may be absent.
pub fn compare_optional_tables(
    message: &str,
    expected: Option<&Table>,
    actual: Option<&Table>,
) -> Result<(), ComparisonFailure> {
    compare_optional_tables_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_optional_tables`] with explicit options.
pub fn compare_optional_tables_with_options(
    options: &CompareOptions,
    message: &str,
    expected: Option<&Table>,
    actual: Option<&Table>,
) -> Result<(), ComparisonFailure> {
    match (expected, actual) {
        (None, None) => Ok(()),
        (Some(e), Some(a)) => compare_tables_with_options(options, message, e, a),
        (e, a) => Err(absence(
            message,
            e.map(|t| render_records(t.rows(), options)),
            a.map(|t| render_records(t.rows(), options)),
            options,
        )),
    }
}

/// Compare each expected table with the actual table of the same name.
///
/// Tables are checked in expected order and the first failure is returned.
/// An expected table with no actual counterpart fails as an absence, with
/// `table=[NAME]` appended to `message`. Actual tables that no expected
/// table names are ignored.
pub fn compare_table_sets(
    message: &str,
    expected: &[Table],
    actual: &[Table],
) -> Result<(), ComparisonFailure> {
    compare_table_sets_with_options(&CompareOptions::default(), message, expected, actual)
}

/// [`compare_table_sets`] with explicit options.
pub fn compare_table_sets_with_options(
    options: &CompareOptions,
    message: &str,
    expected: &[Table],
    actual: &[Table],
) -> Result<(), ComparisonFailure> {
    for table in expected {
        let counterpart = actual.iter().find(|t| t.name() == table.name());
        if counterpart.is_none() {
            let table_message = join_message(message, &format!("table=[{}]", table.name()));
            return compare_optional_tables_with_options(options, &table_message, Some(table), None);
        }
        compare_optional_tables_with_options(options, message, Some(table), counterpart)?;
    }
    debug!("All {} tables matched", expected.len());
    Ok(())
}

/// Index of the first actual row whose key columns normalize the same as
/// expected row `row`. Already-paired rows are not skipped.
fn find_by_key(
    options: &CompareOptions,
    expected: &Table,
    row: usize,
    actual: &Table,
) -> Option<usize> {
    (0..actual.len()).find(|&candidate| {
        expected.primary_keys().iter().all(|pk| {
            options.normalize(expected.value(row, pk))
                == options.normalize(actual.value(candidate, pk))
        })
    })
}
