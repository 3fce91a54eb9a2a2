use super::ValueIndex;
use std::{
    collections::{hash_map::Entry, HashMap},
    hash::Hash,
};

/// Each value is mapped to a `Record` that chains the positions where that
/// value occurs, in insertion order.
///
/// We avoid using a `Vec` to store positions because the common case (a
/// selective value occurring at a single position) would require an additional
/// 24 bytes of memory for each bucket (the `len`, `capacity`, and `ptr`
/// fields). The first position is stored directly in the map entry to avoid
/// indirection (heap jumping) in that case.
struct Record<P: Eq> {
    position: P,
    next: Option<Box<Record<P>>>,
}

/// An iterator over the positions chained off a single value's bucket.
struct Positions<'a, P: Eq> {
    current: Option<&'a Record<P>>,
}

impl<'a, P: Eq> Positions<'a, P> {
    fn new(record: &'a Record<P>) -> Self {
        Self {
            current: Some(record),
        }
    }
}

impl<'a, P: Eq> Iterator for Positions<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|record| {
            let position = &record.position;
            self.current = record.next.as_deref();
            position
        })
    }
}

/// The default per-key value index: a map from value to a deduplicated,
/// insertion-ordered chain of positions.
///
/// Buckets drained by [ValueIndex::remove] are dropped; a later insert for the
/// same value starts a fresh bucket. This is unobservable through the
/// contract.
pub struct ValueMap<V: Eq + Hash, P: Eq + Copy> {
    map: HashMap<V, Record<P>>,
    items: usize,
}

impl<V: Eq + Hash, P: Eq + Copy> Default for ValueMap<V, P> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            items: 0,
        }
    }
}

impl<V: Eq + Hash, P: Eq + Copy> ValueIndex for ValueMap<V, P> {
    type Value = V;
    type Position = P;

    fn insert(&mut self, value: V, position: P) -> bool {
        match self.map.entry(value) {
            Entry::Vacant(entry) => {
                entry.insert(Record {
                    position,
                    next: None,
                });
            }
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                if record.position == position {
                    return false;
                }

                // Walk to the tail, bailing if the position is already
                // chained, then append to keep insertion order.
                let mut next = &mut record.next;
                while let Some(node) = next {
                    if node.position == position {
                        return false;
                    }
                    next = &mut node.next;
                }
                *next = Some(Box::new(Record {
                    position,
                    next: None,
                }));
            }
        }
        self.items += 1;
        true
    }

    fn get<'a>(&'a self, value: &'a V) -> impl Iterator<Item = &'a P> + 'a
    where
        P: 'a,
    {
        self.map
            .get(value)
            .map(Positions::new)
            .into_iter()
            .flatten()
    }

    fn remove(&mut self, position: &P) -> bool {
        let mut removed = 0;
        self.map.retain(|_, record| {
            if record.position == *position {
                removed += 1;
                // Promote the next record into the inline slot, or drop the
                // bucket if this was the only position.
                return match record.next.take() {
                    Some(next) => {
                        *record = *next;
                        true
                    }
                    None => false,
                };
            }

            // Insertion dedup guarantees at most one hit per bucket.
            let mut next = &mut record.next;
            loop {
                let hit = match next.as_deref() {
                    Some(node) => node.position == *position,
                    None => break,
                };
                if hit {
                    let node = next.take().unwrap();
                    *next = node.next;
                    removed += 1;
                    break;
                }
                next = &mut next.as_mut().unwrap().next;
            }
            true
        });
        self.items -= removed;
        removed > 0
    }

    fn items(&self) -> usize {
        self.items
    }
}

impl<V: Eq + Hash, P: Eq + Copy> Drop for ValueMap<V, P> {
    /// To avoid stack overflow on values with long position chains, we
    /// implement an iterative drop (in lieu of Rust's default recursive drop).
    fn drop(&mut self) {
        for (_, mut record) in self.map.drain() {
            let mut next = record.next.take();
            while let Some(mut record) = next {
                next = record.next.take();
            }
        }
    }
}
