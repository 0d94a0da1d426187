use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, Hash};

use comparison_strategy::{Comparer, ComparisonStrategy};
use tracing::trace;

use crate::errors::BiMapError;
use crate::index::OrderedIndex;
pub use crate::iter::{Iter, Keys, Values};

pub mod errors;
pub mod iter;
mod index;
#[cfg(debug_assertions)]
pub mod debug_view;

/// A one-to-one map: every key has exactly one value and every value exactly one key.
///
/// Both directions are hash indexes whose equality and hashing come from the
/// key and value comparers. Each pair is stored once per direction, hence the
/// `Clone` bounds on mutation. Every operation finds all the slots it touches
/// before mutating anything, so a failing comparer leaves the map unchanged.
pub struct StrictBiHashMap<K, V, KC = ComparisonStrategy<K>, VC = ComparisonStrategy<V>> {
    key_comparer: KC,
    value_comparer: VC,
    left_to_right: OrderedIndex<K, V>,
    right_to_left: OrderedIndex<V, K>,
}

impl<K: PartialOrd + Hash, V: PartialOrd + Hash> StrictBiHashMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparers(capacity, ComparisonStrategy::natural(), ComparisonStrategy::natural())
    }
}

impl<K: PartialOrd + Hash + Clone, V: PartialOrd + Hash + Clone> StrictBiHashMap<K, V> {
    /// Copies an existing mapping. Fails if two keys share a value.
    pub fn from_mapping(mapping: impl IntoIterator<Item = (K, V)>) -> Result<Self, BiMapError> {
        Self::from_mapping_with_comparers(mapping, ComparisonStrategy::natural(), ComparisonStrategy::natural())
    }
}

impl<K: PartialOrd + Hash, V: PartialOrd + Hash> Default for StrictBiHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, KC, VC> StrictBiHashMap<K, V, KC, VC> {
    pub fn with_comparers(key_comparer: KC, value_comparer: VC) -> Self {
        Self::with_capacity_and_comparers(0, key_comparer, value_comparer)
    }

    pub fn with_capacity_and_comparers(capacity: usize, key_comparer: KC, value_comparer: VC) -> Self {
        Self {
            key_comparer,
            value_comparer,
            left_to_right: OrderedIndex::with_capacity(capacity),
            right_to_left: OrderedIndex::with_capacity(capacity),
        }
    }

    pub fn comparers(&self) -> (&KC, &VC) {
        (&self.key_comparer, &self.value_comparer)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        assert_eq!(self.right_to_left.len(), self.left_to_right.len());
        self.left_to_right.len()
    }

    /// `(key, value)` pairs in the order keys were bound.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.left_to_right.slots(), self.left_to_right.len())
    }

    /// `(value, key)` pairs in the order values were bound.
    pub fn iter_reverse(&self) -> Iter<'_, V, K> {
        Iter::new(self.right_to_left.slots(), self.right_to_left.len())
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn clear(&mut self) {
        self.left_to_right.clear();
        self.right_to_left.clear();
    }
}

impl<K: Clone, V: Clone, KC: Comparer<K>, VC: Comparer<V>> StrictBiHashMap<K, V, KC, VC> {
    pub fn from_mapping_with_comparers(
        mapping: impl IntoIterator<Item = (K, V)>,
        key_comparer: KC,
        value_comparer: VC,
    ) -> Result<Self, BiMapError> {
        let mapping = mapping.into_iter();
        let mut res = Self::with_capacity_and_comparers(mapping.size_hint().0, key_comparer, value_comparer);
        for (key, value) in mapping {
            res.insert(key, value)?;
        }
        Ok(res)
    }

    /// Adds a new pair. Neither the key nor the value may already be bound.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), BiMapError> {
        let located_key = self.left_to_right.locate(&self.key_comparer, &key)?;
        if located_key.position.is_some() {
            return Err(BiMapError::DuplicateKey);
        }
        let located_value = self.right_to_left.locate(&self.value_comparer, &value)?;
        if located_value.position.is_some() {
            return Err(BiMapError::DuplicateValue);
        }
        self.left_to_right.append(located_key.hash, key.clone(), value.clone());
        self.right_to_left.append(located_value.hash, value, key);
        Ok(())
    }

    pub fn contains_key(&self, key: &K) -> Result<bool, BiMapError> {
        Ok(self.left_to_right.locate(&self.key_comparer, key)?.position.is_some())
    }

    pub fn contains_value(&self, value: &V) -> Result<bool, BiMapError> {
        Ok(self.right_to_left.locate(&self.value_comparer, value)?.position.is_some())
    }

    pub fn get_by_key(&self, key: &K) -> Result<Option<&V>, BiMapError> {
        let located = self.left_to_right.locate(&self.key_comparer, key)?;
        Ok(located.position.map(|position| self.left_to_right.partner(position)))
    }

    pub fn get_by_value(&self, value: &V) -> Result<Option<&K>, BiMapError> {
        let located = self.right_to_left.locate(&self.value_comparer, value)?;
        Ok(located.position.map(|position| self.right_to_left.partner(position)))
    }

    pub fn value_of(&self, key: &K) -> Result<&V, BiMapError> {
        self.get_by_key(key)?.ok_or(BiMapError::KeyNotFound)
    }

    pub fn key_of(&self, value: &V) -> Result<&K, BiMapError> {
        self.get_by_value(value)?.ok_or(BiMapError::ValueNotFound)
    }

    /// Binds `key` to `value`, overwriting whatever either was bound to.
    ///
    /// A key that is already present keeps its place in [`iter`](Self::iter)
    /// and its old value is dropped. If `value` belonged to a different key,
    /// that whole pair is evicted.
    pub fn set_by_key(&mut self, key: K, value: V) -> Result<(), BiMapError> {
        rebind(
            &mut self.left_to_right,
            &self.key_comparer,
            &mut self.right_to_left,
            &self.value_comparer,
            key,
            value,
        )
    }

    /// Binds `value` to `key`, overwriting whatever either was bound to.
    ///
    /// The mirror image of [`set_by_key`](Self::set_by_key): `value` keeps its
    /// place in [`iter_reverse`](Self::iter_reverse).
    pub fn set_by_value(&mut self, value: V, key: K) -> Result<(), BiMapError> {
        rebind(
            &mut self.right_to_left,
            &self.value_comparer,
            &mut self.left_to_right,
            &self.key_comparer,
            value,
            key,
        )
    }

    pub fn remove_by_key(&mut self, key: &K) -> Result<bool, BiMapError> {
        Ok(self.take_by_key(key)?.is_some())
    }

    pub fn remove_by_value(&mut self, value: &V) -> Result<bool, BiMapError> {
        Ok(self.take_by_value(value)?.is_some())
    }

    pub fn take_by_key(&mut self, key: &K) -> Result<Option<(K, V)>, BiMapError> {
        take(
            &mut self.left_to_right,
            &self.key_comparer,
            &mut self.right_to_left,
            &self.value_comparer,
            key,
        )
    }

    pub fn take_by_value(&mut self, value: &V) -> Result<Option<(K, V)>, BiMapError> {
        let taken = take(
            &mut self.right_to_left,
            &self.value_comparer,
            &mut self.left_to_right,
            &self.key_comparer,
            value,
        )?;
        Ok(taken.map(|(value, key)| (key, value)))
    }

    /// Clones pairs into `buffer[offset..]` in key order until either runs
    /// out, returning how many were written.
    pub fn copy_to(&self, buffer: &mut [(K, V)], offset: usize) -> Result<usize, BiMapError> {
        if offset >= buffer.len() {
            return Err(BiMapError::OutOfRange { offset, len: buffer.len() });
        }
        let mut copied = 0;
        for (destination, (key, value)) in buffer[offset..].iter_mut().zip(self.iter()) {
            *destination = (key.clone(), value.clone());
            copied += 1;
        }
        Ok(copied)
    }
}

fn take<A, B>(
    primary: &mut OrderedIndex<A, B>,
    primary_comparer: &impl Comparer<A>,
    secondary: &mut OrderedIndex<B, A>,
    secondary_comparer: &impl Comparer<B>,
    element: &A,
) -> Result<Option<(A, B)>, BiMapError> {
    let position = match primary.locate(primary_comparer, element)?.position {
        Some(position) => position,
        None => return Ok(None),
    };
    let partner_position = secondary.expect_position(secondary_comparer, primary.partner(position))?;
    let taken = primary.remove(position);
    secondary.remove(partner_position);
    Ok(Some(taken))
}

fn rebind<A: Clone, B: Clone>(
    primary: &mut OrderedIndex<A, B>,
    primary_comparer: &impl Comparer<A>,
    secondary: &mut OrderedIndex<B, A>,
    secondary_comparer: &impl Comparer<B>,
    element: A,
    partner: B,
) -> Result<(), BiMapError> {
    let located_element = primary.locate(primary_comparer, &element)?;
    let located_partner = secondary.locate(secondary_comparer, &partner)?;
    let previous_partner = match located_element.position {
        Some(position) => Some(secondary.expect_position(secondary_comparer, primary.partner(position))?),
        None => None,
    };

    if let (Some(position), Some(partner_position)) = (located_element.position, located_partner.position) {
        if previous_partner == Some(partner_position) {
            primary.replace(position, element.clone(), partner.clone());
            secondary.replace(partner_position, partner, element);
            return Ok(());
        }
    }

    let claimant = match located_partner.position {
        Some(partner_position) => {
            Some((partner_position, primary.expect_position(primary_comparer, secondary.partner(partner_position))?))
        }
        None => None,
    };

    if let Some((partner_position, claimant_position)) = claimant {
        trace!(claimant_position, "partner already bound, evicting stale pair");
        primary.remove(claimant_position);
        secondary.remove(partner_position);
    }
    if let Some(partner_position) = previous_partner {
        secondary.remove(partner_position);
    }
    match located_element.position {
        Some(position) => {
            primary.replace(position, element.clone(), partner.clone());
        }
        None => primary.append(located_element.hash, element.clone(), partner.clone()),
    }
    secondary.append(located_partner.hash, partner, element);
    Ok(())
}

impl<K: Clone, V: Clone, KC: Clone, VC: Clone> Clone for StrictBiHashMap<K, V, KC, VC> {
    fn clone(&self) -> Self {
        Self {
            key_comparer: self.key_comparer.clone(),
            value_comparer: self.value_comparer.clone(),
            left_to_right: self.left_to_right.clone(),
            right_to_left: self.right_to_left.clone(),
        }
    }
}

impl<K: Debug, V: Debug, KC, VC> Debug for StrictBiHashMap<K, V, KC, VC> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, KC, VC> IntoIterator for &'a StrictBiHashMap<K, V, KC, VC> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> TryFrom<HashMap<K, V, S>> for StrictBiHashMap<K, V>
where
    K: PartialOrd + Hash + Clone,
    V: PartialOrd + Hash + Clone,
    S: BuildHasher,
{
    type Error = BiMapError;

    fn try_from(mapping: HashMap<K, V, S>) -> Result<Self, Self::Error> {
        Self::from_mapping(mapping)
    }
}
