use std::any::Any;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Comparer, ComparisonError, intrinsic_hash, Presence, presence};

/// Text comparers whose hashing depends on per-instance state.
pub trait WellKnownTextComparer: Sized {
    /// A new instance with fresh state.
    fn reseeded(&self) -> Self;

    /// The instance to persist alongside serialized data, if any.
    fn for_serialization(&self) -> Option<Self>;
}

/// Hashes text with a random per-instance seed so that colliding keys cannot
/// be computed ahead of time. Non-text elements use their intrinsic hash.
///
/// Two instances are equal only when they carry the same seed.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RandomizedComparer {
    entropy: u64,
}

impl RandomizedComparer {
    pub fn new() -> Self {
        Self::with_entropy(rand::random())
    }

    pub fn with_entropy(entropy: u64) -> Self {
        Self { entropy }
    }

    pub fn entropy(&self) -> u64 {
        self.entropy
    }

    fn text_hash(&self, text: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(self.entropy);
        hasher.write(text.as_bytes());
        hasher.finish()
    }
}

impl Default for RandomizedComparer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RandomizedComparer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomizedComparer").finish_non_exhaustive()
    }
}

impl WellKnownTextComparer for RandomizedComparer {
    fn reseeded(&self) -> Self {
        Self::new()
    }

    fn for_serialization(&self) -> Option<Self> {
        None
    }
}

fn as_text<T: Any>(obj: &T) -> Option<&str> {
    let any = obj as &dyn Any;
    if let Some(text) = any.downcast_ref::<String>() {
        return Some(text.as_str());
    }
    if let Some(text) = any.downcast_ref::<&'static str>() {
        return Some(*text);
    }
    if let Some(text) = any.downcast_ref::<Box<str>>() {
        return Some(text.as_ref());
    }
    any.downcast_ref::<Arc<str>>().map(|text| text.as_ref())
}

impl<T: PartialOrd + Hash + Any> Comparer<T> for RandomizedComparer {
    fn compare(&self, a: Option<&T>, b: Option<&T>) -> Result<Ordering, ComparisonError> {
        match presence(a, b) {
            Presence::Decided(ordering) => Ok(ordering),
            Presence::Both(a, b) => a.partial_cmp(b).ok_or(ComparisonError::InvalidArgument),
        }
    }

    fn hash(&self, obj: Option<&T>) -> Result<u64, ComparisonError> {
        let obj = obj.ok_or(ComparisonError::NullArgument)?;
        Ok(match as_text(obj) {
            Some(text) => self.text_hash(text),
            None => intrinsic_hash(obj),
        })
    }
}
