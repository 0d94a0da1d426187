use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use thiserror::Error;

pub use crate::randomized::{RandomizedComparer, WellKnownTextComparer};
pub use crate::strategy::{ComparisonStrategy, HashFn, OrderingFn};

pub mod strategy;
pub mod randomized;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComparisonError {
    #[error("at least one object must implement a comparison")]
    InvalidArgument,
    #[error("value cannot be null")]
    NullArgument,
}

impl ComparisonError {
    /// Stable identifier of the message, for callers keeping their own catalog.
    pub fn resource_name(&self) -> &'static str {
        match self {
            ComparisonError::InvalidArgument => "Argument_InvalidArgumentForComparison",
            ComparisonError::NullArgument => "ArgumentNull_Generic",
        }
    }
}

/// Decides when two elements are the same, and how they hash.
///
/// `None` stands in for an absent element. Implementations must keep `hash`
/// consistent with `compare`: elements comparing `Equal` hash identically.
pub trait Comparer<T: ?Sized> {
    /// An absent element orders before a present one, and an element is
    /// always equal to itself.
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Ordering, ComparisonError>;

    fn equals(&self, a: Option<&T>, b: Option<&T>) -> Result<bool, ComparisonError> {
        Ok(self.compare(a, b)? == Ordering::Equal)
    }

    fn hash(&self, obj: Option<&T>) -> Result<u64, ComparisonError>;
}

pub(crate) enum Presence<'a, T: ?Sized> {
    Decided(Ordering),
    Both(&'a T, &'a T),
}

pub(crate) fn presence<'a, T: ?Sized>(a: Option<&'a T>, b: Option<&'a T>) -> Presence<'a, T> {
    match (a, b) {
        (None, None) => Presence::Decided(Ordering::Equal),
        (None, Some(_)) => Presence::Decided(Ordering::Less),
        (Some(_), None) => Presence::Decided(Ordering::Greater),
        (Some(a), Some(b)) => {
            if std::ptr::eq(a, b) {
                Presence::Decided(Ordering::Equal)
            } else {
                Presence::Both(a, b)
            }
        }
    }
}

/// The element's own `Hash`, through an unkeyed SipHash.
pub fn intrinsic_hash<T: Hash + ?Sized>(obj: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    obj.hash(&mut hasher);
    hasher.finish()
}
