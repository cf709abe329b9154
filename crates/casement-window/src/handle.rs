//! Window handles - opaque references to windows in a [`WindowRegistry`].

use std::fmt;

use casement_core::geometry::{Pos, Rect};
use casement_core::id::GenerationalId;

use crate::bridge::WindowMode;
use crate::error::WindowResult;
use crate::registry::WindowRegistry;
use crate::substrate::{NativeHandle, Substrate};

/// A reference to a window owned by a [`WindowRegistry`].
///
/// Handles are:
/// - Copyable, with no ownership of the window
/// - Checked: a handle to a destroyed window is rejected, even once its slot
///   holds a newer window
/// - Opaque: the native handle is only reachable through the registry
///
/// The default handle is invalid and addresses nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle {
    id: GenerationalId,
}

impl WindowHandle {
    pub const INVALID: Self = Self {
        id: GenerationalId::INVALID,
    };

    pub(crate) const fn new(id: GenerationalId) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> GenerationalId {
        self.id
    }

    /// Whether this handle was ever issued. A valid handle may still be
    /// stale; [`WindowRegistry::contains`] answers that.
    pub const fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    pub fn native_handle<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<NativeHandle> {
        registry.native_handle(*self)
    }

    pub fn size<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<Rect> {
        registry.size(*self)
    }

    pub fn width<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<u32> {
        registry.width(*self)
    }

    pub fn height<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<u32> {
        registry.height(*self)
    }

    pub fn position<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<Pos<i32>> {
        registry.position(*self)
    }

    pub fn is_fullscreen<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<bool> {
        registry.is_fullscreen(*self)
    }

    pub fn is_closed<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<bool> {
        registry.is_closed(*self)
    }

    pub fn mode<S: Substrate>(&self, registry: &WindowRegistry<S>) -> WindowResult<WindowMode> {
        registry.mode(*self)
    }

    pub fn set_caption<S: Substrate>(
        &self,
        registry: &mut WindowRegistry<S>,
        caption: &str,
    ) -> WindowResult<()> {
        registry.set_caption(*self, caption)
    }

    pub fn resize<S: Substrate>(
        &self,
        registry: &mut WindowRegistry<S>,
        width: u32,
        height: u32,
    ) -> WindowResult<()> {
        registry.resize(*self, width, height)
    }

    pub fn set_fullscreen<S: Substrate>(
        &self,
        registry: &mut WindowRegistry<S>,
        enabled: bool,
    ) -> WindowResult<()> {
        registry.set_fullscreen(*self, enabled)
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowHandle")
            .field("index", &self.id.is_valid().then(|| self.id.index()))
            .field("generation", &self.id.generation())
            .finish()
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}", self.id)
    }
}
