use comparison_strategy::{Comparer, ComparisonError};
use hashbrown::HashTable;
use tracing::trace;

const COMPACTION_THRESHOLD: usize = 8;

#[derive(Clone)]
pub(crate) struct Slot<A, B> {
    pub(crate) element: A,
    pub(crate) partner: B,
    hash: u64,
}

/// Where a probe lives in an index, or would live if it were added.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Located {
    pub(crate) hash: u64,
    pub(crate) position: Option<usize>,
}

/// One direction of the map: `element -> partner`, iterated in insertion order.
///
/// The table stores positions into `slots`. Removing leaves a tombstone, so
/// positions handed out stay valid until the next `append`, which is the only
/// operation allowed to compact.
#[derive(Clone)]
pub(crate) struct OrderedIndex<A, B> {
    table: HashTable<usize>,
    slots: Vec<Option<Slot<A, B>>>,
    live: usize,
}

fn out_of_sync() -> ! {
    panic!("forward and reverse indexes out of sync")
}

impl<A, B> OrderedIndex<A, B> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        debug_assert_eq!(self.table.len(), self.live);
        self.live
    }

    pub(crate) fn slots(&self) -> &[Option<Slot<A, B>>] {
        self.slots.as_slice()
    }

    pub(crate) fn locate(&self, comparer: &impl Comparer<A>, probe: &A) -> Result<Located, ComparisonError> {
        let hash = comparer.hash(Some(probe))?;
        let slots = &self.slots;
        let mut failure = None;
        let position = self.table.find(hash, |&position| {
            if failure.is_some() {
                return false;
            }
            match &slots[position] {
                Some(slot) if slot.hash == hash => {
                    match comparer.equals(Some(&slot.element), Some(probe)) {
                        Ok(equal) => equal,
                        Err(err) => {
                            failure = Some(err);
                            false
                        }
                    }
                }
                _ => false,
            }
        }).copied();
        match failure {
            Some(err) => Err(err),
            None => Ok(Located { hash, position }),
        }
    }

    /// Position of a probe the other index says must be here.
    pub(crate) fn expect_position(&self, comparer: &impl Comparer<A>, probe: &A) -> Result<usize, ComparisonError> {
        match self.locate(comparer, probe)?.position {
            Some(position) => Ok(position),
            None => out_of_sync(),
        }
    }

    pub(crate) fn get(&self, position: usize) -> (&A, &B) {
        match &self.slots[position] {
            Some(slot) => (&slot.element, &slot.partner),
            None => out_of_sync(),
        }
    }

    pub(crate) fn partner(&self, position: usize) -> &B {
        self.get(position).1
    }

    /// Swaps the contents of a live slot for an equal element, keeping its place.
    pub(crate) fn replace(&mut self, position: usize, element: A, partner: B) -> (A, B) {
        match &mut self.slots[position] {
            Some(slot) => {
                let element = std::mem::replace(&mut slot.element, element);
                let partner = std::mem::replace(&mut slot.partner, partner);
                (element, partner)
            }
            None => out_of_sync(),
        }
    }

    pub(crate) fn remove(&mut self, position: usize) -> (A, B) {
        let slot = match self.slots[position].take() {
            Some(slot) => slot,
            None => out_of_sync(),
        };
        match self.table.find_entry(slot.hash, |&candidate| candidate == position) {
            Ok(entry) => {
                entry.remove();
            }
            Err(_) => out_of_sync(),
        }
        self.live -= 1;
        if self.live == 0 {
            self.slots.clear();
        }
        (slot.element, slot.partner)
    }

    pub(crate) fn append(&mut self, hash: u64, element: A, partner: B) {
        let tombstones = self.slots.len() - self.live;
        if tombstones >= COMPACTION_THRESHOLD && tombstones > self.live {
            self.compact();
        }
        let position = self.slots.len();
        self.slots.push(Some(Slot { element, partner, hash }));
        let slots = &self.slots;
        self.table.insert_unique(hash, position, |&position| rehash(slots, position));
        self.live += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.table.clear();
        self.slots.clear();
        self.live = 0;
    }

    fn compact(&mut self) {
        trace!(live = self.live, tombstones = self.slots.len() - self.live, "compacting index");
        self.slots.retain(Option::is_some);
        self.table.clear();
        let slots = &self.slots;
        for (position, slot) in slots.iter().enumerate() {
            if let Some(slot) = slot {
                self.table.insert_unique(slot.hash, position, |&position| rehash(slots, position));
            }
        }
    }
}

fn rehash<A, B>(slots: &[Option<Slot<A, B>>], position: usize) -> u64 {
    slots[position].as_ref().map_or(0, |slot| slot.hash)
}
