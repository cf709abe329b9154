//! casement window
//!
//! A registry of native windows addressed by generation-checked handles.
//!
//! [`WindowRegistry`] owns the windows and talks to the native windowing
//! system through the [`Substrate`] trait. Callers only ever hold
//! [`WindowHandle`]s; a handle to a destroyed window keeps failing even after
//! its slot is reused. Substrate notifications are fed back through
//! [`WindowRegistry::dispatch`] or [`WindowRegistry::pump`], which keep the
//! cached geometry and mode of each window current.

pub mod bridge;
pub mod config;
pub mod error;
pub mod handle;
pub mod message;
pub mod registry;
pub mod substrate;

pub use bridge::{PumpStatus, WindowMode};
pub use config::{RegistryConfig, WindowConfig};
pub use error::{WindowError, WindowResult};
pub use handle::WindowHandle;
pub use message::Message;
pub use registry::{WindowRegistry, WindowState};
pub use substrate::{NativeHandle, NativeWindowDesc, Posted, Substrate, WindowProc, WindowStyle};
