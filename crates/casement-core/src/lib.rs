//! casement core
//!
//! Building blocks shared by the casement crates: packed generational
//! identifiers, the slot table that interprets them, geometry, logging and
//! profiling helpers.

pub mod alloc;
pub mod geometry;
pub mod id;
pub mod logging;
pub mod profiling;

pub use alloc::{SlotError, SlotTable};
pub use id::GenerationalId;
