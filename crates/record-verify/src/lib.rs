//! Structural comparison of records and tables for test assertions.
//!
//! Compares expected data with actual data read back from a store, where
//! the two sides may use different native types for the same logical value
//! and element order may not matter. Values are compared through their
//! normalized string forms ([`normalize`]).
//!
//! Every comparison returns `Result<(), ComparisonFailure>`. The failure
//! carries the caller's message followed by generated detail, plus string
//! forms of the expected and actual sides.
//!
//! # Example
//!
//! ```
//! use record_core::{Record, Table};
//! use record_verify::{compare_multiset, compare_tables, NativeEq};
//!
//! assert!(compare_multiset(&["a", "b"], &["b", "a"], &NativeEq, "").is_ok());
//!
//! let row = |pk: &str, v: &str| Record::builder().field("PK", pk).field("V", v).build();
//! let expected = Table::new("T", ["PK", "V"], ["PK"], vec![row("1", "a")]).unwrap();
//! let actual = expected.with_rows(vec![row("1", "b")]).unwrap();
//!
//! let failure = compare_tables("", &expected, &actual).unwrap_err();
//! assert_eq!(failure.message(), "table=T line=1 column=V");
//! ```

pub mod compare;
pub mod error;
pub mod keyed;
pub mod multiset;
pub mod predicate;
pub mod report;

pub use compare::{
    compare_optional_record_lists, compare_optional_record_lists_with_options,
    compare_record_lists, compare_record_lists_with_options, compare_records,
    compare_records_ignoring_order, compare_records_ignoring_order_with_options,
    compare_records_with_options, compare_values, compare_values_with_options, CompareOptions,
};
pub use error::{ComparisonFailure, EquivalenceViolation, Mismatch};
pub use keyed::{
    compare_optional_tables, compare_optional_tables_with_options, compare_table_sets,
    compare_table_sets_with_options, compare_tables, compare_tables_with_options,
};
pub use multiset::{
    compare_multiset, compare_multiset_checked, compare_multiset_rendered,
    compare_optional_multiset,
};
pub use predicate::{check_equivalence_laws, Equivalence, NativeEq, NormalizedEq, PrimaryKeyEq};
pub use record_core::{normalize, NormalizeOptions, Normalized, NULL_DISPLAY};
pub use report::fail_comparing;
