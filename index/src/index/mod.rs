//! An inverted index mapping (key, value) pairs to the record positions where
//! they occur.
//!
//! [Index] routes each insert or lookup to a per-key
//! [ValueIndex](crate::values::ValueIndex) instance, created lazily on the
//! first insert for that key. Removal fans out: a single call evicts a
//! position from every key's structure and reports whether any of them
//! contained it. Lookups are exact-match and yield positions in insertion
//! order.
//!
//! # Warning
//!
//! Positions are opaque: the index never renumbers them. If the caller
//! compacts or reorders its backing storage, the affected positions must be
//! removed and re-inserted by the caller, or lookups will point at stale
//! slots.
//!
//! # Example
//!
//! ```rust
//! use commonware_runtime::deterministic;
//! use field_index::{index::Index, values::ValueMap};
//!
//! let context = deterministic::Context::default();
//! let mut index: Index<ValueMap<&str, usize>> = Index::init(context);
//!
//! index.insert("first_name", "amy", 1);
//! index.insert("first_name", "amy", 5);
//! index.insert("last_name", "smith", 1);
//!
//! let amy: Vec<_> = index.get("first_name", &"amy").copied().collect();
//! assert_eq!(amy, vec![1, 5]);
//!
//! // Evict record 5 from every key in one call.
//! assert!(index.remove(&5));
//! let amy: Vec<_> = index.get("first_name", &"amy").copied().collect();
//! assert_eq!(amy, vec![1]);
//! ```

mod storage;
pub use storage::Index;
