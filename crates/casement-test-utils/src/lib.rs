//! Test utilities for casement.
//!
//! # Overview
//!
//! - `HeadlessSubstrate` - an in-memory [`Substrate`] that records every call
//!   (requires the `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use casement_test_utils::HeadlessSubstrate;
//! use casement_window::{WindowConfig, WindowRegistry};
//!
//! let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
//! let window = registry
//!     .create(&WindowConfig::new().with_size(400, 800))
//!     .unwrap();
//! assert_eq!(registry.width(window).unwrap(), 400);
//! assert_eq!(registry.substrate().count_creates(), 1);
//! # }
//! ```
//!
//! The substrate is deterministic: native handles are numbered from
//! `0x1000` in creation order, top-level windows without a position are
//! placed at `HeadlessSubstrate::DEFAULT_POSITION`, and nothing is
//! dispatched unless a test posts it.

pub use casement_window::Substrate;

#[cfg(feature = "mock")]
pub mod headless;

#[cfg(feature = "mock")]
pub use headless::{FrameMetrics, HeadlessSubstrate, SubstrateCall};
