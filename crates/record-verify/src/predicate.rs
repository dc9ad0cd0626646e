//! Equivalence predicates.
//!
//! The multiset matcher pairs elements greedily and never backtracks. That
//! is only sound when the predicate is a true equivalence relation over the
//! elements being compared (reflexive, symmetric, transitive): then any
//! member of an equivalence class can be consumed first without changing
//! whether a complete pairing exists. With a non-transitive predicate the
//! result is still deterministic for a given input order, but a pairing
//! that exists under a different assignment may be missed.
//! [`check_equivalence_laws`] verifies the laws over concrete inputs.

use crate::error::EquivalenceViolation;
use record_core::{NormalizeOptions, Normalized, Record, Value};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Decides whether an expected element and an actual element are the same.
pub trait Equivalence<E: ?Sized, A: ?Sized = E> {
    fn is_equivalent(&self, expected: &E, actual: &A) -> bool;
}

impl<E: ?Sized, A: ?Sized, F> Equivalence<E, A> for F
where
    F: Fn(&E, &A) -> bool,
{
    fn is_equivalent(&self, expected: &E, actual: &A) -> bool {
        self(expected, actual)
    }
}

/// Native equality (`PartialEq`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEq;

impl<E, A> Equivalence<E, A> for NativeEq
where
    E: PartialEq<A> + ?Sized,
    A: ?Sized,
{
    fn is_equivalent(&self, expected: &E, actual: &A) -> bool {
        expected == actual
    }
}

/// Equality of normalized string forms.
///
/// Values are equal when they normalize identically; records are equal when
/// they have the same field names and every field normalizes identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedEq {
    pub options: NormalizeOptions,
}

impl NormalizedEq {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    fn normalized_fields<'r>(&self, record: &'r Record) -> BTreeMap<&'r str, Normalized> {
        record
            .iter()
            .map(|(name, value)| (name, self.options.normalize(value)))
            .collect()
    }
}

impl Equivalence<Value> for NormalizedEq {
    fn is_equivalent(&self, expected: &Value, actual: &Value) -> bool {
        self.options.normalize(expected) == self.options.normalize(actual)
    }
}

impl Equivalence<Record> for NormalizedEq {
    fn is_equivalent(&self, expected: &Record, actual: &Record) -> bool {
        expected.field_count() == actual.field_count()
            && self.normalized_fields(expected) == self.normalized_fields(actual)
    }
}

/// Equality on a designated subset of fields, compared in normalized form.
///
/// An absent field reads as null, so two records both lacking a key field
/// agree on it.
#[derive(Debug, Clone, Default)]
pub struct PrimaryKeyEq {
    keys: Vec<String>,
    options: NormalizeOptions,
}

impl PrimaryKeyEq {
    pub fn new<K>(keys: K) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            options: NormalizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Equivalence<Record> for PrimaryKeyEq {
    fn is_equivalent(&self, expected: &Record, actual: &Record) -> bool {
        self.keys.iter().all(|key| {
            self.options.normalize(expected.value(key)) == self.options.normalize(actual.value(key))
        })
    }
}

/// Check that `predicate` behaves as an equivalence relation over `elements`.
///
/// Cost is cubic in the number of elements; intended for debug builds and
/// tests.
pub fn check_equivalence_laws<'a, T, P, I>(
    elements: I,
    predicate: &P,
) -> Result<(), EquivalenceViolation>
where
    T: Display + ?Sized + 'a,
    P: Equivalence<T> + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let elements: Vec<&T> = elements.into_iter().collect();

    for x in &elements {
        if !predicate.is_equivalent(x, x) {
            return Err(EquivalenceViolation::NotReflexive(x.to_string()));
        }
    }

    for x in &elements {
        for y in &elements {
            if predicate.is_equivalent(x, y) && !predicate.is_equivalent(y, x) {
                return Err(EquivalenceViolation::NotSymmetric(
                    x.to_string(),
                    y.to_string(),
                ));
            }
        }
    }

    for x in &elements {
        for y in elements.iter().filter(|y| predicate.is_equivalent(x, y)) {
            for z in elements.iter().filter(|z| predicate.is_equivalent(y, z)) {
                if !predicate.is_equivalent(x, z) {
                    return Err(EquivalenceViolation::NotTransitive(
                        x.to_string(),
                        y.to_string(),
                        z.to_string(),
                    ));
                }
            }
        }
    }

    Ok(())
}
