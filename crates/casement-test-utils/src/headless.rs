//! In-memory substrate for testing.
//!
//! [`HeadlessSubstrate`] keeps native windows as plain records and answers
//! geometry queries from them, so the registry can be driven without a
//! display.

use std::collections::VecDeque;

use casement_core::alloc::{HashMap, HashSet};
use casement_core::geometry::{Pos, Rect, Size};
use casement_window::message::{Message, codes};
use casement_window::substrate::{
    NativeHandle, NativeWindowDesc, Posted, Substrate, WindowProc, WindowStyle,
};
use parking_lot::Mutex;

/// Records a substrate call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstrateCall {
    RegisterClass {
        class_name: String,
    },
    CreateWindow {
        caption: String,
        style: WindowStyle,
        position: Option<Pos<i32>>,
        size: Size<u32>,
        parent: Option<NativeHandle>,
    },
    DestroyWindow {
        window: NativeHandle,
    },
    SetStyle {
        window: NativeHandle,
        style: WindowStyle,
    },
    MoveWindow {
        window: NativeHandle,
        position: Pos<i32>,
        size: Size<u32>,
    },
    Show {
        window: NativeHandle,
    },
    Update {
        window: NativeHandle,
    },
    SetCaption {
        window: NativeHandle,
        caption: String,
    },
    SetUserData {
        window: NativeHandle,
        data: u64,
    },
    SetWindowProc {
        window: NativeHandle,
    },
    DefaultProc {
        window: NativeHandle,
        message: Message,
    },
}

/// Decoration sizes used to turn client rectangles into outer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Width of the resize border on each side.
    pub border: i32,
    /// Height of the title bar, on top of the border.
    pub caption: i32,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            border: 8,
            caption: 23,
        }
    }
}

impl FrameMetrics {
    /// Left, top, right and bottom insets of a window with `style`.
    pub fn insets(&self, style: WindowStyle) -> (i32, i32, i32, i32) {
        if style.is_child() {
            return (0, 0, 0, 0);
        }
        let border = if style.intersects(WindowStyle::THICK_FRAME | WindowStyle::CAPTION) {
            self.border
        } else {
            0
        };
        let caption = if style.contains(WindowStyle::CAPTION) {
            self.caption
        } else {
            0
        };
        (border, border + caption, border, border)
    }
}

#[derive(Debug, Clone)]
struct NativeWindow {
    caption: String,
    style: WindowStyle,
    /// Outer rectangle; screen coordinates for top-level windows, parent
    /// client coordinates for children.
    outer: Rect,
    user_data: Option<u64>,
    window_proc: Option<WindowProc>,
    /// Set once the user closed the window. The record stays until its
    /// destroy notification has been delivered, or until `destroy_window`.
    closed: bool,
    destroy_delivered: bool,
}

#[derive(Debug, Default)]
struct State {
    classes: HashSet<String>,
    windows: HashMap<NativeHandle, NativeWindow>,
    next_handle: usize,
    queue: VecDeque<Posted>,
    pending_failures: usize,
}

impl State {
    /// Forget `window` along with every notification still queued for it.
    fn remove_window(&mut self, window: NativeHandle) {
        self.windows.remove(&window);
        self.queue.retain(
            |posted| !matches!(posted, Posted::Notification { window: w, .. } if *w == window),
        );
    }

    /// Drop closed windows whose destroy notification was already handed out.
    fn reap_closed(&mut self) {
        let reaped: Vec<_> = self
            .windows
            .iter()
            .filter(|(_, w)| w.closed && w.destroy_delivered)
            .map(|(handle, _)| *handle)
            .collect();
        for window in reaped {
            self.remove_window(window);
        }
    }
}

/// Deterministic in-memory [`Substrate`].
///
/// Methods take `&self` like the trait requires, so all state sits behind
/// `parking_lot` mutexes.
///
/// # Example
///
/// ```rust
/// use casement_test_utils::HeadlessSubstrate;
/// use casement_window::{Message, PumpStatus, WindowConfig, WindowRegistry};
///
/// let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
/// let window = registry.create(&WindowConfig::default()).unwrap();
/// let native = registry.native_handle(window).unwrap();
///
/// registry.substrate().close(native);
/// registry.substrate().post_quit(0);
/// assert_eq!(registry.pump(), PumpStatus::Quit { exit_code: 0 });
/// assert!(registry.is_closed(window).unwrap());
/// ```
pub struct HeadlessSubstrate {
    calls: Mutex<Vec<SubstrateCall>>,
    state: Mutex<State>,
    metrics: FrameMetrics,
}

impl HeadlessSubstrate {
    /// Where top-level windows go when created without a position.
    pub const DEFAULT_POSITION: Pos<i32> = Pos::new(64, 64);

    const FIRST_HANDLE: usize = 0x1000;

    pub fn new() -> Self {
        Self::with_metrics(FrameMetrics::default())
    }

    pub fn with_metrics(metrics: FrameMetrics) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            state: Mutex::new(State {
                next_handle: Self::FIRST_HANDLE,
                ..Default::default()
            }),
            metrics,
        }
    }

    pub fn metrics(&self) -> FrameMetrics {
        self.metrics
    }

    fn record(&self, call: SubstrateCall) {
        self.calls.lock().push(call);
    }

    fn with_window<R>(&self, window: NativeHandle, f: impl FnOnce(&mut NativeWindow) -> R) -> Option<R> {
        self.state.lock().windows.get_mut(&window).map(f)
    }

    // --- Driving the substrate from tests ---

    /// Queue a notification for `window`.
    pub fn post(&self, window: NativeHandle, message: Message) {
        self.state
            .lock()
            .queue
            .push_back(Posted::Notification { window, message });
    }

    /// Queue a quit request.
    pub fn post_quit(&self, exit_code: i32) {
        self.state.lock().queue.push_back(Posted::Quit { exit_code });
    }

    /// Simulate the user closing `window`: it stops being alive and a
    /// destroy notification is queued. Closing twice queues nothing more.
    ///
    /// The record is dropped on the first poll after that notification is
    /// delivered, together with anything else still queued for it.
    pub fn close(&self, window: NativeHandle) {
        let newly_closed = self.with_window(window, |w| !std::mem::replace(&mut w.closed, true));
        if newly_closed == Some(true) {
            self.post(window, Message::destroy());
        }
    }

    /// Make the next `create_window` call fail.
    pub fn fail_next_create(&self) {
        self.state.lock().pending_failures += 1;
    }

    /// Simulate the user dragging the frame to a new outer size.
    pub fn set_outer_size(&self, window: NativeHandle, size: Size<u32>) {
        self.with_window(window, |w| w.outer = w.outer.with_size(size));
    }

    /// Simulate the user moving and resizing the window.
    pub fn set_outer_rect(&self, window: NativeHandle, rect: Rect) {
        self.with_window(window, |w| w.outer = rect);
    }

    // --- Inspection ---

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<SubstrateCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn count(&self, predicate: impl Fn(&SubstrateCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Number of `create_window` calls, failed ones included.
    pub fn count_creates(&self) -> usize {
        self.count(|call| matches!(call, SubstrateCall::CreateWindow { .. }))
    }

    pub fn count_destroys(&self) -> usize {
        self.count(|call| matches!(call, SubstrateCall::DestroyWindow { .. }))
    }

    pub fn count_class_registrations(&self) -> usize {
        self.count(|call| matches!(call, SubstrateCall::RegisterClass { .. }))
    }

    pub fn count_default_procs(&self) -> usize {
        self.count(|call| matches!(call, SubstrateCall::DefaultProc { .. }))
    }

    /// Native windows that exist and have not been closed.
    pub fn live_windows(&self) -> usize {
        self.state.lock().windows.values().filter(|w| !w.closed).count()
    }

    pub fn pending_messages(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_alive(&self, window: NativeHandle) -> bool {
        self.with_window(window, |w| !w.closed).unwrap_or(false)
    }

    pub fn is_visible(&self, window: NativeHandle) -> bool {
        self.with_window(window, |w| w.style.contains(WindowStyle::VISIBLE))
            .unwrap_or(false)
    }

    pub fn style(&self, window: NativeHandle) -> Option<WindowStyle> {
        self.with_window(window, |w| w.style)
    }

    pub fn caption(&self, window: NativeHandle) -> Option<String> {
        self.with_window(window, |w| w.caption.clone())
    }

    pub fn outer_rect(&self, window: NativeHandle) -> Option<Rect> {
        self.with_window(window, |w| w.outer)
    }
}

impl Default for HeadlessSubstrate {
    fn default() -> Self {
        Self::new()
    }
}

impl Substrate for HeadlessSubstrate {
    fn register_class(&self, class_name: &str) -> bool {
        self.record(SubstrateCall::RegisterClass {
            class_name: class_name.to_string(),
        });
        self.state.lock().classes.insert(class_name.to_string());
        true
    }

    fn create_window(&self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle> {
        self.record(SubstrateCall::CreateWindow {
            caption: desc.caption.to_string(),
            style: desc.style,
            position: desc.position,
            size: desc.size,
            parent: desc.parent,
        });

        let mut state = self.state.lock();
        if state.pending_failures > 0 {
            state.pending_failures -= 1;
            return None;
        }
        if !state.classes.contains(desc.class_name) {
            return None;
        }
        if let Some(parent) = desc.parent
            && !state.windows.contains_key(&parent)
        {
            return None;
        }

        let handle = NativeHandle::from_raw(state.next_handle);
        state.next_handle += 0x10;
        let position = desc.position.unwrap_or(if desc.parent.is_some() {
            Pos::default()
        } else {
            Self::DEFAULT_POSITION
        });
        state.windows.insert(
            handle,
            NativeWindow {
                caption: desc.caption.to_string(),
                style: desc.style,
                outer: Rect::from_origin_size(position, desc.size),
                user_data: None,
                window_proc: None,
                closed: false,
                destroy_delivered: false,
            },
        );
        Some(handle)
    }

    fn destroy_window(&self, window: NativeHandle) {
        self.record(SubstrateCall::DestroyWindow { window });
        self.state.lock().remove_window(window);
    }

    fn client_rect(&self, window: NativeHandle) -> Rect {
        self.with_window(window, |w| {
            let (left, top, right, bottom) = self.metrics.insets(w.style);
            let extent = |outer: u32, inset: i32| {
                i32::try_from(outer)
                    .unwrap_or(i32::MAX)
                    .saturating_sub(inset)
                    .max(0)
            };
            let width = extent(w.outer.width(), left.saturating_add(right));
            let height = extent(w.outer.height(), top.saturating_add(bottom));
            Rect::new(0, 0, width, height)
        })
        .unwrap_or_default()
    }

    fn window_rect(&self, window: NativeHandle) -> Rect {
        self.with_window(window, |w| w.outer).unwrap_or_default()
    }

    fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect {
        let (left, top, right, bottom) = self.metrics.insets(style);
        client.outset(left, top, right, bottom)
    }

    fn set_style(&self, window: NativeHandle, style: WindowStyle) {
        self.record(SubstrateCall::SetStyle { window, style });
        self.with_window(window, |w| w.style = style);
    }

    fn move_window(&self, window: NativeHandle, position: Pos<i32>, size: Size<u32>) {
        self.record(SubstrateCall::MoveWindow {
            window,
            position,
            size,
        });
        self.with_window(window, |w| w.outer = Rect::from_origin_size(position, size));
    }

    fn show(&self, window: NativeHandle) {
        self.record(SubstrateCall::Show { window });
        self.with_window(window, |w| w.style |= WindowStyle::VISIBLE);
    }

    fn update(&self, window: NativeHandle) {
        self.record(SubstrateCall::Update { window });
    }

    fn set_caption(&self, window: NativeHandle, caption: &str) {
        self.record(SubstrateCall::SetCaption {
            window,
            caption: caption.to_string(),
        });
        self.with_window(window, |w| w.caption = caption.to_string());
    }

    fn set_user_data(&self, window: NativeHandle, data: u64) {
        self.record(SubstrateCall::SetUserData { window, data });
        self.with_window(window, |w| w.user_data = Some(data));
    }

    fn user_data(&self, window: NativeHandle) -> Option<u64> {
        self.with_window(window, |w| w.user_data).flatten()
    }

    fn set_window_proc(&self, window: NativeHandle, proc_: WindowProc) {
        self.record(SubstrateCall::SetWindowProc { window });
        self.with_window(window, |w| w.window_proc = Some(proc_));
    }

    fn window_proc(&self, window: NativeHandle) -> Option<WindowProc> {
        self.with_window(window, |w| w.window_proc).flatten()
    }

    fn default_proc(&self, window: NativeHandle, message: Message) -> isize {
        self.record(SubstrateCall::DefaultProc { window, message });
        0
    }

    fn poll_message(&self) -> Option<Posted> {
        let mut state = self.state.lock();
        state.reap_closed();
        let posted = state.queue.pop_front()?;
        if let Posted::Notification { window, message } = &posted
            && message.code == codes::DESTROY
            && let Some(w) = state.windows.get_mut(window)
        {
            w.destroy_delivered = w.closed;
        }
        Some(posted)
    }
}
