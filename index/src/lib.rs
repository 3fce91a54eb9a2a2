//! Map keyed field values to the record positions where they occur.
//!
//! `field-index` answers "which records have field `key` equal to `value`?"
//! without scanning the record set. Records live in caller-owned storage
//! (e.g. a `Vec` the caller manages); the index tracks opaque positions and
//! never renumbers them. Lookups are exact-match and preserve insertion
//! order. Removing a position evicts it from every key's structure in a
//! single call.

pub mod index;
pub mod values;
