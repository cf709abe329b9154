//! The boundary with the native windowing substrate.
//!
//! Everything the registry needs from the host windowing system goes through
//! [`Substrate`]. Native handles are opaque beyond equality and being passed
//! back to the substrate.

use std::fmt;
use std::sync::Arc;

use casement_core::geometry::{Pos, Rect, Size};

use crate::message::Message;

/// A raw native window handle. Never handed to callers of the registry as an
/// identity; it only crosses back into the substrate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    pub const NULL: Self = Self(0);

    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.0)
    }
}

/// Per-window notification callback, stored on the native window and invoked
/// for every notification the bridge forwards.
///
/// Arguments are the native window, the notification code, and the two
/// notification parameters. The return value is handed back to the substrate.
pub type WindowProc = fn(NativeHandle, u32, usize, isize) -> isize;

bitflags::bitflags! {
    /// Native window style bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const MAXIMIZE_BOX = 0x0001_0000;
        const MINIMIZE_BOX = 0x0002_0000;
        const THICK_FRAME = 0x0004_0000;
        const SYS_MENU = 0x0008_0000;
        const CAPTION = 0x00C0_0000;
        const VISIBLE = 0x1000_0000;
        const CHILD = 0x4000_0000;

        /// Standard decorated top-level window.
        const OVERLAPPED_WINDOW = Self::CAPTION.bits()
            | Self::SYS_MENU.bits()
            | Self::THICK_FRAME.bits()
            | Self::MINIMIZE_BOX.bits()
            | Self::MAXIMIZE_BOX.bits();
    }
}

impl WindowStyle {
    /// No chrome at all; used while a window is fullscreen.
    pub const BORDERLESS: Self = Self::empty();

    pub const fn is_child(&self) -> bool {
        self.contains(Self::CHILD)
    }
}

/// Everything the substrate needs to create one native window.
#[derive(Debug, Clone, Copy)]
pub struct NativeWindowDesc<'a> {
    pub class_name: &'a str,
    pub caption: &'a str,
    pub style: WindowStyle,
    /// Outer top-left; `None` lets the substrate choose.
    pub position: Option<Pos<i32>>,
    /// Outer size, decoration included.
    pub size: Size<u32>,
    pub parent: Option<NativeHandle>,
}

/// Something pulled off the substrate's notification queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posted {
    Notification {
        window: NativeHandle,
        message: Message,
    },
    /// Explicit request to leave the message loop.
    Quit { exit_code: i32 },
}

/// The native windowing system.
///
/// Methods take `&self`; implementations that record or cache state use
/// interior mutability. All calls happen on the thread that owns the
/// substrate's message loop.
pub trait Substrate {
    /// Make the window class available. Returns `true` if the class exists
    /// after the call, whether or not this call registered it.
    fn register_class(&self, class_name: &str) -> bool;

    /// Create a native window, or `None` if the substrate refuses.
    fn create_window(&self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle>;

    fn destroy_window(&self, window: NativeHandle);

    /// Client area in client coordinates (top-left is always the origin).
    fn client_rect(&self, window: NativeHandle) -> Rect;

    /// Outer rectangle in screen coordinates.
    fn window_rect(&self, window: NativeHandle) -> Rect;

    /// Outer rectangle needed for `client` to be the client area under `style`.
    fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect;

    fn set_style(&self, window: NativeHandle, style: WindowStyle);

    /// Move and resize the outer rectangle.
    fn move_window(&self, window: NativeHandle, position: Pos<i32>, size: Size<u32>);

    /// Show the window in its normal (restored) state.
    fn show(&self, window: NativeHandle);

    /// Flush any pending repaint.
    fn update(&self, window: NativeHandle);

    fn set_caption(&self, window: NativeHandle, caption: &str);

    /// Write the per-window user-data slot.
    fn set_user_data(&self, window: NativeHandle, data: u64);

    /// Read the per-window user-data slot; `None` if never written.
    fn user_data(&self, window: NativeHandle) -> Option<u64>;

    /// Write the secondary per-window storage holding the callback.
    fn set_window_proc(&self, window: NativeHandle, proc_: WindowProc);

    fn window_proc(&self, window: NativeHandle) -> Option<WindowProc>;

    /// The substrate's own handling for notifications nobody else consumed.
    fn default_proc(&self, window: NativeHandle, message: Message) -> isize;

    /// Take the next posted notification without blocking.
    fn poll_message(&self) -> Option<Posted>;
}

macro_rules! forward_substrate {
    ($($ty:ty),*) => {$(
        impl<T: Substrate + ?Sized> Substrate for $ty {
            fn register_class(&self, class_name: &str) -> bool {
                (**self).register_class(class_name)
            }
            fn create_window(&self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle> {
                (**self).create_window(desc)
            }
            fn destroy_window(&self, window: NativeHandle) {
                (**self).destroy_window(window)
            }
            fn client_rect(&self, window: NativeHandle) -> Rect {
                (**self).client_rect(window)
            }
            fn window_rect(&self, window: NativeHandle) -> Rect {
                (**self).window_rect(window)
            }
            fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect {
                (**self).adjust_window_rect(client, style)
            }
            fn set_style(&self, window: NativeHandle, style: WindowStyle) {
                (**self).set_style(window, style)
            }
            fn move_window(&self, window: NativeHandle, position: Pos<i32>, size: Size<u32>) {
                (**self).move_window(window, position, size)
            }
            fn show(&self, window: NativeHandle) {
                (**self).show(window)
            }
            fn update(&self, window: NativeHandle) {
                (**self).update(window)
            }
            fn set_caption(&self, window: NativeHandle, caption: &str) {
                (**self).set_caption(window, caption)
            }
            fn set_user_data(&self, window: NativeHandle, data: u64) {
                (**self).set_user_data(window, data)
            }
            fn user_data(&self, window: NativeHandle) -> Option<u64> {
                (**self).user_data(window)
            }
            fn set_window_proc(&self, window: NativeHandle, proc_: WindowProc) {
                (**self).set_window_proc(window, proc_)
            }
            fn window_proc(&self, window: NativeHandle) -> Option<WindowProc> {
                (**self).window_proc(window)
            }
            fn default_proc(&self, window: NativeHandle, message: Message) -> isize {
                (**self).default_proc(window, message)
            }
            fn poll_message(&self) -> Option<Posted> {
                (**self).poll_message()
            }
        }
    )*};
}

forward_substrate!(&T, Box<T>, Arc<T>);
