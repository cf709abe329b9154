//! Window registry: a slot table of window state in front of the substrate.

use casement_core::alloc::SlotTable;
use casement_core::geometry::{Pos, Rect, Size};
use casement_core::profiling::profile_function;

use crate::config::{RegistryConfig, WindowConfig};
use crate::error::{WindowError, WindowResult};
use crate::handle::WindowHandle;
use crate::substrate::{NativeHandle, NativeWindowDesc, Substrate, WindowStyle};

/// Cached state of one window.
#[derive(Debug, Clone)]
pub struct WindowState {
    pub(crate) native: NativeHandle,
    pub(crate) client_area: Rect,
    pub(crate) fullscreen_area: Rect,
    pub(crate) top_left: Pos<i32>,
    /// Style the window was created with. Restored when leaving fullscreen.
    pub(crate) style: WindowStyle,
    pub(crate) is_fullscreen: bool,
    pub(crate) is_closed: bool,
}

impl WindowState {
    fn reserved(client_area: Rect, style: WindowStyle) -> Self {
        Self {
            native: NativeHandle::NULL,
            client_area,
            fullscreen_area: Rect::default(),
            top_left: Pos::default(),
            style,
            is_fullscreen: false,
            is_closed: false,
        }
    }

    pub fn native_handle(&self) -> NativeHandle {
        self.native
    }

    /// Client area while windowed.
    pub fn client_area(&self) -> Rect {
        self.client_area
    }

    /// Client area captured while fullscreen.
    pub fn fullscreen_area(&self) -> Rect {
        self.fullscreen_area
    }

    /// Outer top-left in screen coordinates, saved at creation and when
    /// entering fullscreen.
    pub fn top_left(&self) -> Pos<i32> {
        self.top_left
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn is_child(&self) -> bool {
        self.style.is_child()
    }

    /// The rectangle that currently describes the window's client area.
    pub fn area(&self) -> Rect {
        if self.is_fullscreen {
            self.fullscreen_area
        } else {
            self.client_area
        }
    }

    pub(crate) fn area_mut(&mut self) -> &mut Rect {
        if self.is_fullscreen {
            &mut self.fullscreen_area
        } else {
            &mut self.client_area
        }
    }
}

/// Owns every window created through it and the substrate they live on.
///
/// Windows are addressed by [`WindowHandle`]s. A handle whose window has
/// been destroyed is rejected by every operation, even after its slot has
/// been reused for a newer window.
///
/// # Example
///
/// ```ignore
/// let mut registry = WindowRegistry::new(substrate);
/// let window = registry.create(&WindowConfig::new().with_size(400, 800))?;
/// assert_eq!(registry.width(window)?, 400);
/// registry.set_fullscreen(window, true)?;
/// ```
pub struct WindowRegistry<S: Substrate> {
    pub(crate) substrate: S,
    pub(crate) windows: SlotTable<WindowState>,
    config: RegistryConfig,
    class_registered: bool,
}

impl<S: Substrate> WindowRegistry<S> {
    pub fn new(substrate: S) -> Self {
        Self::with_config(substrate, RegistryConfig::default())
    }

    pub fn with_config(substrate: S, config: RegistryConfig) -> Self {
        Self {
            substrate,
            windows: SlotTable::new(),
            config,
            class_registered: false,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// Create a native window and start tracking it.
    ///
    /// The slot is reserved before the native window exists so its id can be
    /// stashed on the native handle. If the substrate refuses to create the
    /// window the slot is released again.
    pub fn create(&mut self, config: &WindowConfig) -> WindowResult<WindowHandle> {
        profile_function!();

        if !self.class_registered {
            self.class_registered = self.substrate.register_class(&self.config.class_name);
            if !self.class_registered {
                tracing::warn!("Failed to register window class '{}'", self.config.class_name);
            }
        }

        let style = match config.parent {
            Some(_) => WindowStyle::VISIBLE | WindowStyle::CHILD,
            None => WindowStyle::VISIBLE | WindowStyle::OVERLAPPED_WINDOW,
        };
        let client_area =
            Rect::from_origin_size(Pos::default(), config.client_size(self.config.default_size));
        let outer = self.substrate.adjust_window_rect(client_area, style);
        let caption = config
            .caption
            .as_deref()
            .unwrap_or(&self.config.default_caption);

        let id = self.windows.add(WindowState::reserved(client_area, style));

        let desc = NativeWindowDesc {
            class_name: &self.config.class_name,
            caption,
            style,
            position: config.position(),
            size: outer.size(),
            parent: config.parent,
        };
        let Some(native) = self.substrate.create_window(&desc) else {
            if let Err(err) = self.windows.remove(id) {
                tracing::error!("Failed to release reserved slot {}: {}", id, err);
            }
            tracing::error!("Substrate refused to create window '{}'", caption);
            return Err(WindowError::CreationFailed {
                caption: caption.to_string(),
            });
        };

        self.substrate.set_user_data(native, id.to_bits());
        if let Some(callback) = config.callback {
            self.substrate.set_window_proc(native, callback);
        }
        let top_left = self.substrate.window_rect(native).top_left();

        let state = self.windows.get_mut(id)?;
        state.native = native;
        state.top_left = top_left;

        self.substrate.show(native);
        self.substrate.update(native);

        tracing::debug!(
            "Created window {} ({:?}) '{}' {}x{}",
            id,
            native,
            caption,
            client_area.width(),
            client_area.height()
        );
        Ok(WindowHandle::new(id))
    }

    /// Destroy the window and free its slot.
    ///
    /// Returns `false` without touching anything if the handle is invalid or
    /// was already destroyed.
    pub fn destroy(&mut self, handle: WindowHandle) -> bool {
        profile_function!();
        let state = match self.windows.remove(handle.id()) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("Ignoring destroy of window {}: {}", handle.id(), err);
                return false;
            }
        };
        // A closed window has already been torn down by the substrate.
        if !state.is_closed {
            self.substrate.destroy_window(state.native);
        }
        tracing::debug!("Destroyed window {} ({:?})", handle.id(), state.native);
        true
    }

    /// Destroy every window still tracked.
    pub fn shutdown(&mut self) {
        let handles: Vec<_> = self.handles().collect();
        if handles.is_empty() {
            return;
        }
        tracing::debug!("Shutting down {} window(s)", handles.len());
        for handle in handles {
            self.destroy(handle);
        }
    }

    fn lookup(windows: &SlotTable<WindowState>, handle: WindowHandle) -> WindowResult<&WindowState> {
        windows.get(handle.id()).map_err(|err| {
            tracing::error!("Window lookup failed for {}: {}", handle.id(), err);
            WindowError::from(err)
        })
    }

    fn lookup_mut(
        windows: &mut SlotTable<WindowState>,
        handle: WindowHandle,
    ) -> WindowResult<&mut WindowState> {
        windows.get_mut(handle.id()).map_err(|err| {
            tracing::error!("Window lookup failed for {}: {}", handle.id(), err);
            WindowError::from(err)
        })
    }

    pub fn state(&self, handle: WindowHandle) -> WindowResult<&WindowState> {
        Self::lookup(&self.windows, handle)
    }

    pub fn native_handle(&self, handle: WindowHandle) -> WindowResult<NativeHandle> {
        self.state(handle).map(WindowState::native_handle)
    }

    /// The current client rectangle: the fullscreen one while fullscreen.
    pub fn size(&self, handle: WindowHandle) -> WindowResult<Rect> {
        self.state(handle).map(WindowState::area)
    }

    pub fn width(&self, handle: WindowHandle) -> WindowResult<u32> {
        self.size(handle).map(|area| area.width())
    }

    pub fn height(&self, handle: WindowHandle) -> WindowResult<u32> {
        self.size(handle).map(|area| area.height())
    }

    pub fn is_fullscreen(&self, handle: WindowHandle) -> WindowResult<bool> {
        self.state(handle).map(WindowState::is_fullscreen)
    }

    pub fn is_closed(&self, handle: WindowHandle) -> WindowResult<bool> {
        self.state(handle).map(WindowState::is_closed)
    }

    pub fn style(&self, handle: WindowHandle) -> WindowResult<WindowStyle> {
        self.state(handle).map(WindowState::style)
    }

    pub fn position(&self, handle: WindowHandle) -> WindowResult<Pos<i32>> {
        self.state(handle).map(WindowState::top_left)
    }

    pub fn set_caption(&mut self, handle: WindowHandle, caption: &str) -> WindowResult<()> {
        let state = Self::lookup(&self.windows, handle)?;
        self.substrate.set_caption(state.native, caption);
        Ok(())
    }

    /// Resize the client area.
    ///
    /// Child windows are sized by their parent, so for them this only
    /// refreshes the cached client rectangle. Sizes that do not fit the
    /// `i32` coordinate space are clamped to it.
    pub fn resize(&mut self, handle: WindowHandle, width: u32, height: u32) -> WindowResult<()> {
        profile_function!();
        let state = Self::lookup_mut(&mut self.windows, handle)?;
        if state.is_child() {
            state.client_area = self.substrate.client_rect(state.native);
            return Ok(());
        }

        let area = state.area_mut();
        *area = area.with_size(Size::new(width, height));
        let area = *area;
        Self::move_to_area(&self.substrate, state, area);
        tracing::debug!("Resized window {} to {}x{}", handle.id(), width, height);
        Ok(())
    }

    /// Switch between windowed and borderless fullscreen.
    ///
    /// Requesting the current mode does nothing. Child windows never go
    /// fullscreen.
    pub fn set_fullscreen(&mut self, handle: WindowHandle, enabled: bool) -> WindowResult<()> {
        profile_function!();
        let state = Self::lookup_mut(&mut self.windows, handle)?;
        if state.is_fullscreen == enabled {
            return Ok(());
        }
        if state.is_child() {
            tracing::debug!("Ignoring fullscreen request for child window {}", handle.id());
            return Ok(());
        }

        let native = state.native;
        state.is_fullscreen = enabled;
        if enabled {
            state.client_area = self.substrate.client_rect(native);
            state.top_left = self.substrate.window_rect(native).top_left();
            self.substrate.set_style(native, WindowStyle::BORDERLESS);
            self.substrate.show(native);
            state.fullscreen_area = self.substrate.client_rect(native);
        } else {
            self.substrate.set_style(native, state.style);
            Self::move_to_area(&self.substrate, state, state.client_area);
            self.substrate.show(native);
        }

        tracing::debug!(
            "Window {} {} fullscreen",
            handle.id(),
            if enabled { "entered" } else { "left" }
        );
        Ok(())
    }

    /// Move the window to its saved top-left with an outer size that fits
    /// `area` under its stored style.
    fn move_to_area(substrate: &S, state: &WindowState, area: Rect) {
        let outer = substrate.adjust_window_rect(area, state.style);
        substrate.move_window(state.native, state.top_left, outer.size());
    }

    /// Whether the handle addresses a live window.
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains(handle.id())
    }

    /// Number of tracked windows, closed ones included.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.windows.ids().map(WindowHandle::new)
    }

    /// `true` once every tracked window has been closed by the substrate.
    /// Vacuously `true` for an empty registry.
    pub fn all_closed(&self) -> bool {
        self.windows.iter().all(|(_, state)| state.is_closed)
    }
}

impl<S: Substrate> Drop for WindowRegistry<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: Substrate> std::fmt::Debug for WindowRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.windows)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
