//! Allocation and collection types for casement.
//!
//! This module provides:
//! - [`SlotTable`], generation-checked slot storage
//! - Re-exports of hash collections using AHash

pub mod slot_table;

pub use slot_table::{SlotError, SlotTable};

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
