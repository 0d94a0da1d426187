use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Comparer, ComparisonError, intrinsic_hash, Presence, presence};

pub type OrderingFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;
pub type HashFn<T> = Arc<dyn Fn(&T) -> u64 + Send + Sync>;

enum OrderingPolicy<T: ?Sized> {
    Custom(OrderingFn<T>),
    Intrinsic(fn(&T, &T) -> Option<Ordering>),
    Unavailable,
}

impl<T: ?Sized> Clone for OrderingPolicy<T> {
    fn clone(&self) -> Self {
        match self {
            OrderingPolicy::Custom(ordering) => OrderingPolicy::Custom(ordering.clone()),
            OrderingPolicy::Intrinsic(partial_cmp) => OrderingPolicy::Intrinsic(*partial_cmp),
            OrderingPolicy::Unavailable => OrderingPolicy::Unavailable,
        }
    }
}

enum HashPolicy<T: ?Sized> {
    Custom(HashFn<T>),
    Intrinsic(fn(&T) -> u64),
}

impl<T: ?Sized> Clone for HashPolicy<T> {
    fn clone(&self) -> Self {
        match self {
            HashPolicy::Custom(hasher) => HashPolicy::Custom(hasher.clone()),
            HashPolicy::Intrinsic(hash) => HashPolicy::Intrinsic(*hash),
        }
    }
}

/// An immutable pair of an optional ordering and a hash function.
///
/// Whatever is not supplied falls back to the element type's own `PartialOrd`
/// and `Hash`. A strategy built without any ordering rejects every comparison
/// of two present elements with [`ComparisonError::InvalidArgument`], as does
/// a natural ordering that is undefined for the pair (`NaN` and friends).
pub struct ComparisonStrategy<T: ?Sized> {
    ordering: OrderingPolicy<T>,
    hashing: HashPolicy<T>,
}

impl<T: PartialOrd + Hash + ?Sized> ComparisonStrategy<T> {
    pub fn natural() -> Self {
        Self {
            ordering: OrderingPolicy::Intrinsic(T::partial_cmp),
            hashing: HashPolicy::Intrinsic(intrinsic_hash::<T>),
        }
    }
}

impl<T: Hash + ?Sized> ComparisonStrategy<T> {
    pub fn unordered() -> Self {
        Self {
            ordering: OrderingPolicy::Unavailable,
            hashing: HashPolicy::Intrinsic(intrinsic_hash::<T>),
        }
    }
}

impl<T: ?Sized> ComparisonStrategy<T> {
    pub fn custom(
        ordering: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
        hasher: impl Fn(&T) -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            ordering: OrderingPolicy::Custom(Arc::new(ordering)),
            hashing: HashPolicy::Custom(Arc::new(hasher)),
        }
    }

    pub fn hashed_by(hasher: impl Fn(&T) -> u64 + Send + Sync + 'static) -> Self {
        Self {
            ordering: OrderingPolicy::Unavailable,
            hashing: HashPolicy::Custom(Arc::new(hasher)),
        }
    }

    pub fn with_ordering(self, ordering: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self {
            ordering: OrderingPolicy::Custom(Arc::new(ordering)),
            hashing: self.hashing,
        }
    }

    pub fn with_hasher(self, hasher: impl Fn(&T) -> u64 + Send + Sync + 'static) -> Self {
        Self {
            ordering: self.ordering,
            hashing: HashPolicy::Custom(Arc::new(hasher)),
        }
    }

    pub fn has_ordering(&self) -> bool {
        !matches!(self.ordering, OrderingPolicy::Unavailable)
    }
}

impl<T: AsRef<str> + ?Sized + 'static> ComparisonStrategy<T> {
    /// Orders and hashes text ignoring ASCII case.
    pub fn case_insensitive() -> Self {
        Self::custom(
            |a: &T, b: &T| {
                let a = a.as_ref().bytes().map(|byte| byte.to_ascii_lowercase());
                let b = b.as_ref().bytes().map(|byte| byte.to_ascii_lowercase());
                a.cmp(b)
            },
            |obj: &T| {
                let mut hasher = DefaultHasher::new();
                for byte in obj.as_ref().bytes() {
                    hasher.write_u8(byte.to_ascii_lowercase());
                }
                hasher.finish()
            },
        )
    }
}

impl<T: PartialOrd + Hash + ?Sized> Default for ComparisonStrategy<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T: ?Sized> Clone for ComparisonStrategy<T> {
    fn clone(&self) -> Self {
        Self {
            ordering: self.ordering.clone(),
            hashing: self.hashing.clone(),
        }
    }
}

impl<T: ?Sized> Debug for ComparisonStrategy<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ordering = match self.ordering {
            OrderingPolicy::Custom(_) => "custom",
            OrderingPolicy::Intrinsic(_) => "intrinsic",
            OrderingPolicy::Unavailable => "unavailable",
        };
        let hashing = match self.hashing {
            HashPolicy::Custom(_) => "custom",
            HashPolicy::Intrinsic(_) => "intrinsic",
        };
        f.debug_struct("ComparisonStrategy")
            .field("ordering", &ordering)
            .field("hashing", &hashing)
            .finish()
    }
}

impl<T: ?Sized> Comparer<T> for ComparisonStrategy<T> {
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Ordering, ComparisonError> {
        let (a, b) = match presence(a, b) {
            Presence::Decided(ordering) => return Ok(ordering),
            Presence::Both(a, b) => (a, b),
        };
        match &self.ordering {
            OrderingPolicy::Custom(ordering) => Ok(ordering(a, b)),
            OrderingPolicy::Intrinsic(partial_cmp) => partial_cmp(a, b).ok_or(ComparisonError::InvalidArgument),
            OrderingPolicy::Unavailable => Err(ComparisonError::InvalidArgument),
        }
    }

    fn hash(&self, obj: Option<&T>) -> Result<u64, ComparisonError> {
        let obj = obj.ok_or(ComparisonError::NullArgument)?;
        Ok(match &self.hashing {
            HashPolicy::Custom(hasher) => hasher(obj),
            HashPolicy::Intrinsic(hash) => hash(obj),
        })
    }
}
