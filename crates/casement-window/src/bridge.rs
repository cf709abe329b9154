//! Routing of substrate notifications into the registry.
//!
//! Every notification for a window goes through [`WindowRegistry::dispatch`].
//! The few that change cached state are applied first; then the notification
//! is handed to the window's callback, or to the substrate's default handler
//! when there is none.

use casement_core::id::GenerationalId;
use casement_core::profiling::{self, profile_function, profile_scope};

use crate::error::WindowResult;
use crate::handle::WindowHandle;
use crate::message::{Message, codes};
use crate::registry::WindowRegistry;
use crate::substrate::{NativeHandle, Posted, Substrate};

/// Mode of a window as seen by its notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowMode {
    Windowed,
    Fullscreen,
    /// The substrate destroyed the native window. Terminal.
    Closed,
}

/// Result of draining the substrate's notification queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// Queue drained; keep running.
    Continue,
    /// A quit request was seen.
    Quit { exit_code: i32 },
}

/// What a notification does to the cached state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Close,
    RefreshArea,
}

impl Transition {
    fn of(message: &Message) -> Option<Self> {
        match message.code {
            codes::DESTROY => Some(Transition::Close),
            codes::EXIT_SIZE_MOVE => Some(Transition::RefreshArea),
            codes::SIZE if message.wparam == codes::SIZE_MAXIMIZED => Some(Transition::RefreshArea),
            codes::SYS_COMMAND if message.wparam == codes::SC_RESTORE => {
                Some(Transition::RefreshArea)
            }
            _ => None,
        }
    }
}

impl<S: Substrate> WindowRegistry<S> {
    pub fn mode(&self, handle: WindowHandle) -> WindowResult<WindowMode> {
        self.state(handle).map(|state| {
            if state.is_closed {
                WindowMode::Closed
            } else if state.is_fullscreen {
                WindowMode::Fullscreen
            } else {
                WindowMode::Windowed
            }
        })
    }

    /// The handle whose id is stashed on `native`, if it is still tracked.
    pub fn handle_for(&self, native: NativeHandle) -> Option<WindowHandle> {
        let id = GenerationalId::from_bits(self.substrate.user_data(native)?);
        let state = self.windows.get(id).ok()?;
        (state.native == native).then_some(WindowHandle::new(id))
    }

    /// Handle one notification for `native` and return the result of the
    /// window's callback (or the substrate's default handling).
    pub fn dispatch(&mut self, native: NativeHandle, message: Message) -> isize {
        profile_function!();
        tracing::trace!("Dispatching {:?} to {:?}", message, native);

        if let Some(transition) = Transition::of(&message) {
            self.apply(native, transition);
        }

        match self.substrate.window_proc(native) {
            Some(callback) => callback(native, message.code, message.wparam, message.lparam),
            None => self.substrate.default_proc(native, message),
        }
    }

    fn apply(&mut self, native: NativeHandle, transition: Transition) {
        let handle = self.handle_for(native);
        debug_assert!(handle.is_some(), "notification for untracked window {:?}", native);
        let Some(handle) = handle else {
            tracing::error!(
                "No tracked window for {:?}; dropping {:?} transition",
                native,
                transition
            );
            return;
        };
        let Ok(state) = self.windows.get_mut(handle.id()) else {
            return;
        };
        if state.is_closed {
            return;
        }

        match transition {
            Transition::Close => {
                state.is_closed = true;
                tracing::debug!("Window {} closed", handle.id());
            }
            Transition::RefreshArea => {
                let area = self.substrate.client_rect(native);
                *state.area_mut() = area;
                tracing::trace!(
                    "Window {} client area now {}x{}",
                    handle.id(),
                    area.width(),
                    area.height()
                );
            }
        }
    }

    /// Dispatch every notification waiting in the substrate's queue.
    ///
    /// An empty queue is not a reason to stop; only an explicit quit is.
    /// Notifications queued behind a quit stay in the queue. Each call starts
    /// a new profiler frame.
    pub fn pump(&mut self) -> PumpStatus {
        profiling::new_frame();
        profile_scope!("pump");
        while let Some(posted) = self.substrate.poll_message() {
            match posted {
                Posted::Notification { window, message } => {
                    self.dispatch(window, message);
                }
                Posted::Quit { exit_code } => {
                    tracing::debug!("Quit requested with exit code {}", exit_code);
                    return PumpStatus::Quit { exit_code };
                }
            }
        }
        PumpStatus::Continue
    }
}
