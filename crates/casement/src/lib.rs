//! Casement - generation-checked handles for native windows
//!
//! Casement puts a registry between callers and a native windowing
//! substrate. Callers hold small `Copy` handles instead of raw native
//! handles:
//!
//! - **Generational ids**: a handle to a destroyed window is rejected, even
//!   after its slot has been reused
//! - **Cached state**: geometry and display mode are tracked per window and
//!   kept current from substrate notifications
//! - **Fullscreen**: borderless fullscreen with the windowed geometry restored
//!   on exit
//!
//! # Quick Start
//!
//! ```ignore
//! use casement::prelude::*;
//!
//! casement::logging::init();
//!
//! let mut registry = WindowRegistry::new(substrate);
//! let window = registry.create(&WindowConfig::new().with_size(1280, 720))?;
//!
//! while registry.pump() == PumpStatus::Continue && !registry.all_closed() {
//!     // Render a frame...
//! }
//! ```
//!
//! # Crates
//!
//! - [`core`] - `GenerationalId`, `SlotTable`, geometry, logging, profiling
//! - [`window`] - the substrate boundary and the window registry

pub use casement_core as core;
pub use casement_core::{logging, profiling};
pub use casement_window as window;

pub use casement_core::geometry::{Pos, Rect, Size};
pub use casement_core::{GenerationalId, SlotError, SlotTable};
pub use casement_window::{
    Message, NativeHandle, PumpStatus, RegistryConfig, Substrate, WindowConfig, WindowError,
    WindowHandle, WindowMode, WindowProc, WindowRegistry, WindowResult, WindowStyle,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use casement_core::geometry::{Pos, Rect, Size};

    pub use casement_window::message::{Message, codes};
    pub use casement_window::{
        NativeHandle, PumpStatus, RegistryConfig, Substrate, WindowConfig, WindowError,
        WindowHandle, WindowMode, WindowProc, WindowRegistry, WindowResult, WindowStyle,
    };
}
