use std::iter::FusedIterator;

use crate::index::Slot;

/// Pairs of one index in insertion order. Produced by
/// [`StrictBiHashMap::iter`](crate::StrictBiHashMap::iter) as `(key, value)` and by
/// [`StrictBiHashMap::iter_reverse`](crate::StrictBiHashMap::iter_reverse) as `(value, key)`.
pub struct Iter<'a, A, B> {
    slots: std::slice::Iter<'a, Option<Slot<A, B>>>,
    remaining: usize,
}

impl<'a, A, B> Iter<'a, A, B> {
    pub(crate) fn new(slots: &'a [Option<Slot<A, B>>], live: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: live,
        }
    }
}

impl<A, B> Clone for Iter<'_, A, B> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, A, B> Iterator for Iter<'a, A, B> {
    type Item = (&'a A, &'a B);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(slot) = slot {
                self.remaining -= 1;
                return Some((&slot.element, &slot.partner));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<A, B> DoubleEndedIterator for Iter<'_, A, B> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(slot) = slot {
                self.remaining -= 1;
                return Some((&slot.element, &slot.partner));
            }
        }
        None
    }
}

impl<A, B> ExactSizeIterator for Iter<'_, A, B> {}

impl<A, B> FusedIterator for Iter<'_, A, B> {}

pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
