use crate::values::ValueIndex;
use commonware_runtime::Metrics;
use prometheus_client::metrics::{counter::Counter, gauge::Gauge};
use std::collections::{hash_map::Entry, HashMap};

/// The initial capacity of the internal key map. Record sets are typically
/// indexed under a handful of field names; the map grows as needed.
const INITIAL_CAPACITY: usize = 16;

/// An in-memory inverted index from keyed field values to record positions.
///
/// Each distinct key owns one per-key value index (an implementation of
/// [ValueIndex]), created lazily on the first insert for that key and retained
/// for the lifetime of the index even if removals drain it.
pub struct Index<S: ValueIndex> {
    map: HashMap<String, S>,

    keys: Gauge,
    items: Gauge,
    pruned: Counter,
}

impl<S: ValueIndex> Index<S> {
    /// Create a new empty index, registering metrics with the given context.
    pub fn init(ctx: impl Metrics) -> Self {
        let s = Self {
            map: HashMap::with_capacity(INITIAL_CAPACITY),
            keys: Gauge::default(),
            items: Gauge::default(),
            pruned: Counter::default(),
        };
        ctx.register("keys", "Number of keys in the index", s.keys.clone());
        ctx.register(
            "items",
            "Number of (key, value, position) entries in the index",
            s.items.clone(),
        );
        ctx.register(
            "pruned",
            "Number of entries removed from the index",
            s.pruned.clone(),
        );
        s
    }

    /// Register `position` under `(key, value)`.
    ///
    /// The per-key structure for `key` is created lazily and persists even
    /// when this call reports a duplicate. Returns `true` if the triple was
    /// newly recorded, `false` if it was already present.
    pub fn insert(&mut self, key: &str, value: S::Value, position: S::Position) -> bool {
        let values = match self.map.entry(key.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.keys.inc();
                entry.insert(S::default())
            }
        };
        let inserted = values.insert(value, position);
        if inserted {
            self.items.inc();
        }
        inserted
    }

    /// Returns an iterator over all positions recorded for `(key, value)`, in
    /// insertion order.
    ///
    /// The iterator is empty if the key was never indexed or the value is
    /// absent under it.
    pub fn get<'a>(
        &'a self,
        key: &str,
        value: &'a S::Value,
    ) -> impl Iterator<Item = &'a S::Position> + 'a
    where
        S::Position: 'a,
    {
        self.map
            .get(key)
            .map(|values| values.get(value))
            .into_iter()
            .flatten()
    }

    /// Remove `position` from every key's structure.
    ///
    /// Returns `true` if the position was recorded under at least one key.
    /// Keys whose structures become empty are retained; the key set never
    /// shrinks. The result does not depend on key iteration order.
    pub fn remove(&mut self, position: &S::Position) -> bool {
        let mut found = false;
        for values in self.map.values_mut() {
            let before = values.items();
            if values.remove(position) {
                found = true;
                let removed = before - values.items();
                self.pruned.inc_by(removed as u64);
                self.items.dec_by(removed as i64);
            }
        }
        found
    }

    /// The number of distinct keys ever indexed (drained keys included).
    pub fn keys(&self) -> usize {
        self.map.len()
    }

    /// The number of live (key, value, position) entries across all keys.
    pub fn items(&self) -> usize {
        self.items.get() as usize
    }

    /// Returns whether the index holds no entries.
    ///
    /// Keys may still be registered; only live entries are counted.
    pub fn is_empty(&self) -> bool {
        self.items() == 0
    }
}
