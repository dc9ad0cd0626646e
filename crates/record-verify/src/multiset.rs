//! Order-insensitive multiset comparison.

use crate::compare::CompareOptions;
use crate::error::{ComparisonFailure, Mismatch};
use crate::predicate::{check_equivalence_laws, Equivalence};
use crate::report::{absence, fail_comparing, render_list};
use std::fmt::Display;
use tracing::{debug, trace};

/// Assert that `expected` and `actual` hold the same elements with the same
/// multiplicities under `predicate`, ignoring order.
///
/// Elements are paired greedily: expected elements are visited in order and
/// each claims the first still-unclaimed actual element it is equivalent to.
/// Expected elements that find no partner are reported together with the
/// actual elements nobody claimed. This is exact when `predicate` is an
/// equivalence relation over the inputs (see [`crate::predicate`]).
///
/// A size difference fails immediately without comparing any element.
/// Neither input is modified. Elements are rendered with `Display`; use
/// [`compare_multiset_rendered`] when the diagnostic should show another
/// form, such as the normalized one the predicate compared.
pub fn compare_multiset<E, A, P>(
    expected: &[E],
    actual: &[A],
    predicate: &P,
    message: &str,
) -> Result<(), ComparisonFailure>
where
    E: Display,
    A: Display,
    P: Equivalence<E, A> + ?Sized,
{
    compare_multiset_rendered(
        expected,
        actual,
        predicate,
        message,
        |e: &E| e.to_string(),
        |a: &A| a.to_string(),
    )
}

/// [`compare_multiset`] with caller-supplied rendering of each side's
/// elements in the failure.
pub fn compare_multiset_rendered<E, A, P, RE, RA>(
    expected: &[E],
    actual: &[A],
    predicate: &P,
    message: &str,
    render_expected: RE,
    render_actual: RA,
) -> Result<(), ComparisonFailure>
where
    P: Equivalence<E, A> + ?Sized,
    RE: Fn(&E) -> String,
    RA: Fn(&A) -> String,
{
    if same_slice(expected, actual) {
        trace!("Multiset comparison short-circuited on identical input");
        return Ok(());
    }

    if expected.len() != actual.len() {
        return Err(fail_comparing(
            message,
            Mismatch::Size {
                expected: expected.len(),
                actual: actual.len(),
            },
            render_list(expected.iter().map(&render_expected)),
            render_list(actual.iter().map(&render_actual)),
        ));
    }

    let mut unclaimed: Vec<usize> = (0..actual.len()).collect();
    let mut unmatched: Vec<&E> = Vec::new();

    for (idx, e) in expected.iter().enumerate() {
        match unclaimed
            .iter()
            .position(|&a| predicate.is_equivalent(e, &actual[a]))
        {
            Some(pos) => {
                let a = unclaimed.remove(pos);
                trace!("Expected element {} paired with actual element {}", idx, a);
            }
            None => unmatched.push(e),
        }
    }

    if unmatched.is_empty() {
        debug!("Multiset comparison matched {} elements", expected.len());
        return Ok(());
    }

    Err(fail_comparing(
        message,
        Mismatch::Content {
            leftover_expected: unmatched.into_iter().map(&render_expected).collect(),
            leftover_actual: unclaimed.iter().map(|&a| render_actual(&actual[a])).collect(),
        },
        render_list(expected.iter().map(&render_expected)),
        render_list(actual.iter().map(&render_actual)),
    ))
}

/// [`compare_multiset`] where either side may be absent.
///
/// Both absent is a match; exactly one absent is an absence mismatch.
pub fn compare_optional_multiset<E, A, P>(
    expected: Option<&[E]>,
    actual: Option<&[A]>,
    predicate: &P,
    message: &str,
) -> Result<(), ComparisonFailure>
where
    E: Display,
    A: Display,
    P: Equivalence<E, A> + ?Sized,
{
    match (expected, actual) {
        (None, None) => Ok(()),
        (Some(e), Some(a)) => compare_multiset(e, a, predicate, message),
        (e, a) => Err(absence(
            message,
            e.map(|e| render_list(e)),
            a.map(|a| render_list(a)),
            &CompareOptions::default(),
        )),
    }
}

/// [`compare_multiset`] for a homogeneous element type that, in debug
/// builds, first verifies `predicate` is an equivalence relation over the
/// union of both inputs.
///
/// # Panics
///
/// In debug builds, panics if the predicate violates reflexivity, symmetry
/// or transitivity on the given elements. That is a bug in the caller's
/// predicate, not a comparison failure.
pub fn compare_multiset_checked<T, P>(
    expected: &[T],
    actual: &[T],
    predicate: &P,
    message: &str,
) -> Result<(), ComparisonFailure>
where
    T: Display,
    P: Equivalence<T> + ?Sized,
{
    if cfg!(debug_assertions) {
        if let Err(violation) = check_equivalence_laws(expected.iter().chain(actual), predicate) {
            panic!("multiset predicate is not an equivalence relation: {violation}");
        }
    }
    compare_multiset(expected, actual, predicate, message)
}

/// Whether both slices are the very same memory.
fn same_slice<E, A>(expected: &[E], actual: &[A]) -> bool {
    std::mem::size_of::<E>() != 0
        && std::mem::size_of::<E>() == std::mem::size_of::<A>()
        && expected.len() == actual.len()
        && std::ptr::eq(expected.as_ptr().cast::<u8>(), actual.as_ptr().cast::<u8>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{NativeEq, NormalizedEq};
    use record_core::{NormalizeOptions, Record, Value};
    use rust_decimal::Decimal;
    use std::cell::Cell;
    use std::str::FromStr;

    #[test]
    fn test_permutation_matches() {
        let expected = ["a", "b", "c", "b"];
        let actual = ["b", "c", "b", "a"];
        assert!(compare_multiset(&expected, &actual, &NativeEq, "").is_ok());
    }

    #[test]
    fn test_order_independent_for_every_permutation() {
        let expected = [1, 2, 2, 3];
        let permutations = [
            [1, 2, 2, 3],
            [2, 1, 3, 2],
            [3, 2, 2, 1],
            [2, 3, 1, 2],
        ];
        for actual in permutations {
            assert!(compare_multiset(&expected, &actual, &NativeEq, "").is_ok());
        }

        let wrong = [1, 2, 3, 3];
        assert!(compare_multiset(&expected, &wrong, &NativeEq, "").is_err());
    }

    #[test]
    fn test_multiplicity_matters() {
        let expected = ["a", "a", "b"];
        let actual = ["a", "b", "b"];
        let failure = compare_multiset(&expected, &actual, &NativeEq, "").unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Content {
                leftover_expected: vec!["a".to_string()],
                leftover_actual: vec!["b".to_string()],
            }
        );
    }

    #[test]
    fn test_size_mismatch() {
        let expected = ["foo", "bar", "baz"];
        let actual = ["bar", "baz"];
        let failure = compare_multiset(&expected, &actual, &NativeEq, "").unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Size {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(failure.expected(), "[foo, bar, baz]");
        assert_eq!(failure.actual(), "[bar, baz]");
    }

    #[test]
    fn test_size_mismatch_compares_no_element() {
        let calls = Cell::new(0);
        let counting = |e: &&str, a: &&str| {
            calls.set(calls.get() + 1);
            e == a
        };
        let expected = ["x".repeat(10_000)];
        let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
        let actual = ["a", "b"];
        let failure = compare_multiset(&expected, &actual, &counting, "").unwrap_err();
        assert!(matches!(failure.mismatch(), Mismatch::Size { .. }));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_content_mismatch_reports_leftovers() {
        let expected = ["foo", "bar", "baz"];
        let actual = ["hoge", "foo", "baz"];
        let failure = compare_multiset(&expected, &actual, &NativeEq, "msg").unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Content {
                leftover_expected: vec!["bar".to_string()],
                leftover_actual: vec!["hoge".to_string()],
            }
        );
        assert_eq!(
            failure.message(),
            "msg different element(s) found. expected has [bar], actual has [hoge]."
        );
        assert_eq!(failure.expected(), "[foo, bar, baz]");
        assert_eq!(failure.actual(), "[hoge, foo, baz]");
    }

    #[test]
    fn test_records_with_mixed_types() {
        let expected = vec![
            Record::builder().field("id", "1").field("val", "a").build(),
            Record::builder().field("id", "2").field("val", "b").build(),
        ];
        let actual = vec![
            Record::builder().field("id", 2).field("val", "b").build(),
            Record::builder().field("id", 1).field("val", "a").build(),
        ];
        assert!(compare_multiset(&expected, &actual, &NormalizedEq::default(), "").is_ok());
    }

    #[test]
    fn test_rendered_leftovers_use_given_form() {
        let keep_scale = NormalizeOptions {
            trim_decimal_zeros: false,
        };
        let expected = [Value::text("1.1")];
        let actual = [Value::Decimal(Decimal::from_str("1.10").unwrap())];
        let render = |v: &Value| keep_scale.normalize(v).to_string();

        let failure = compare_multiset_rendered(
            &expected,
            &actual,
            &NormalizedEq::new(keep_scale),
            "",
            render,
            render,
        )
        .unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Content {
                leftover_expected: vec!["1.1".to_string()],
                leftover_actual: vec!["1.10".to_string()],
            }
        );
        assert_eq!(failure.expected(), "[1.1]");
        assert_eq!(failure.actual(), "[1.10]");
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["b".to_string(), "x".to_string()];
        let _ = compare_multiset(&expected, &actual, &NativeEq, "");
        assert_eq!(expected, vec!["a", "b"]);
        assert_eq!(actual, vec!["b", "x"]);
    }

    #[test]
    fn test_identical_slice_short_circuits() {
        let never = |_: &i32, _: &i32| false;
        let items = [1, 2, 3];
        assert!(compare_multiset(&items, &items, &never, "").is_ok());
    }

    #[test]
    fn test_empty_collections_match() {
        let expected: [&str; 0] = [];
        let actual: Vec<&str> = Vec::new();
        assert!(compare_multiset(&expected, &actual, &NativeEq, "").is_ok());
    }

    #[test]
    fn test_null_symmetry() {
        let items = ["a"];
        assert!(compare_optional_multiset::<&str, &str, _>(None, None, &NativeEq, "").is_ok());

        let failure =
            compare_optional_multiset::<&str, &str, _>(None, Some(&items[..]), &NativeEq, "")
                .unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Absence {
                expected_present: false
            }
        );
        assert_eq!(failure.expected(), "<null>");
        assert_eq!(failure.actual(), "[a]");

        let failure =
            compare_optional_multiset::<&str, &str, _>(Some(&items[..]), None, &NativeEq, "")
                .unwrap_err();
        assert_eq!(
            failure.mismatch(),
            &Mismatch::Absence {
                expected_present: true
            }
        );
    }

    #[test]
    fn test_checked_accepts_equivalence() {
        let expected = ["a", "b"];
        let actual = ["b", "a"];
        assert!(compare_multiset_checked(&expected, &actual, &NativeEq, "").is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not an equivalence relation")]
    fn test_checked_rejects_non_transitive_predicate() {
        let near = |e: &i32, a: &i32| (e - a).abs() <= 1;
        let _ = compare_multiset_checked(&[1, 2], &[2, 3], &near, "");
    }
}
