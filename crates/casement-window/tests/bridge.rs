//! Notification bridge tests.
//!
//! These tests drive the registry the way a message loop would: the headless
//! substrate queues notifications and `pump`/`dispatch` route them back into
//! the registry and on to per-window callbacks.

use std::cell::RefCell;

use casement_core::geometry::{Rect, Size};
use casement_test_utils::{HeadlessSubstrate, SubstrateCall};
use casement_window::message::{Message, codes};
use casement_window::{
    NativeHandle, PumpStatus, WindowConfig, WindowHandle, WindowMode, WindowRegistry,
};

thread_local! {
    static SEEN: RefCell<Vec<(NativeHandle, u32, usize, isize)>> = const { RefCell::new(Vec::new()) };
}

fn recording_proc(window: NativeHandle, code: u32, wparam: usize, lparam: isize) -> isize {
    SEEN.with(|seen| seen.borrow_mut().push((window, code, wparam, lparam)));
    7
}

fn take_seen() -> Vec<(NativeHandle, u32, usize, isize)> {
    SEEN.with(|seen| seen.borrow_mut().drain(..).collect())
}

fn setup(config: WindowConfig) -> (WindowRegistry<HeadlessSubstrate>, WindowHandle, NativeHandle) {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    let window = registry.create(&config).unwrap();
    let native = registry.native_handle(window).unwrap();
    (registry, window, native)
}

#[test]
fn test_destroy_notification_closes_window() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));

    registry.substrate().close(native);
    assert_eq!(registry.is_closed(window), Ok(false));

    assert_eq!(registry.pump(), PumpStatus::Continue);
    assert_eq!(registry.is_closed(window), Ok(true));
    assert_eq!(registry.mode(window), Ok(WindowMode::Closed));
    // Closing does not free the slot.
    assert!(registry.contains(window));
    assert_eq!(registry.width(window), Ok(400));

    assert!(registry.destroy(window));
    // The substrate already tore the window down.
    assert_eq!(registry.substrate().count_destroys(), 0);
    assert!(registry.is_closed(window).is_err());
}

#[test]
fn test_all_closed() {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    assert!(registry.all_closed());

    let natives: Vec<_> = (0..3)
        .map(|_| {
            let window = registry.create(&WindowConfig::new().with_size(10, 10)).unwrap();
            registry.native_handle(window).unwrap()
        })
        .collect();
    assert!(!registry.all_closed());

    for native in &natives[..2] {
        registry.substrate().close(*native);
    }
    registry.pump();
    assert!(!registry.all_closed());

    registry.substrate().close(natives[2]);
    registry.pump();
    assert!(registry.all_closed());
}

#[test]
fn test_exit_size_move_requeries_client_area() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));

    // User drags the frame; the cached size only changes once the drag ends.
    registry
        .substrate()
        .set_outer_size(native, Size::new(616, 439));
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 400, 800)));

    registry.substrate().post(native, Message::exit_size_move());
    registry.pump();
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 600, 400)));
}

#[test]
fn test_maximize_requeries_client_area() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));

    registry
        .substrate()
        .set_outer_size(native, Size::new(1936, 1119));
    registry.dispatch(native, Message::maximized(1920, 1080));
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 1920, 1080)));
}

#[test]
fn test_restore_requeries_client_area() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));

    registry
        .substrate()
        .set_outer_size(native, Size::new(216, 139));
    registry.dispatch(native, Message::restore());
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 200, 100)));
}

#[test]
fn test_plain_size_notification_is_ignored() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));

    registry
        .substrate()
        .set_outer_size(native, Size::new(216, 139));
    registry.dispatch(native, Message::size(codes::SIZE_RESTORED, 200, 100));
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 400, 800)));
}

#[test]
fn test_requery_while_fullscreen_targets_fullscreen_area() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));
    registry.set_fullscreen(window, true).unwrap();

    registry
        .substrate()
        .set_outer_size(native, Size::new(2560, 1440));
    registry.dispatch(native, Message::exit_size_move());
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 2560, 1440)));

    registry.set_fullscreen(window, false).unwrap();
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 400, 800)));
}

#[test]
fn test_closed_window_ignores_geometry_notifications() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(400, 800));
    registry.dispatch(native, Message::destroy());

    registry
        .substrate()
        .set_outer_size(native, Size::new(216, 139));
    registry.dispatch(native, Message::exit_size_move());
    assert_eq!(registry.size(window), Ok(Rect::new(0, 0, 400, 800)));
    assert_eq!(registry.mode(window), Ok(WindowMode::Closed));
}

#[test]
fn test_callback_sees_every_notification() {
    take_seen();
    let (mut registry, _window, native) = setup(
        WindowConfig::new()
            .with_size(400, 800)
            .with_callback(recording_proc),
    );
    assert!(registry
        .substrate()
        .calls()
        .contains(&SubstrateCall::SetWindowProc { window: native }));

    let close = Message::close();
    let maximized = Message::maximized(1920, 1080);
    assert_eq!(registry.dispatch(native, close), 7);
    assert_eq!(registry.dispatch(native, maximized), 7);
    assert_eq!(registry.dispatch(native, Message::new(0x0400, 1, -1)), 7);

    assert_eq!(
        take_seen(),
        vec![
            (native, close.code, close.wparam, close.lparam),
            (native, maximized.code, maximized.wparam, maximized.lparam),
            (native, 0x0400, 1, -1),
        ]
    );
    assert_eq!(registry.substrate().count_default_procs(), 0);
}

#[test]
fn test_default_proc_without_callback() {
    let (mut registry, _window, native) = setup(WindowConfig::new().with_size(10, 10));

    assert_eq!(registry.dispatch(native, Message::close()), 0);
    assert_eq!(registry.dispatch(native, Message::exit_size_move()), 0);
    assert_eq!(registry.substrate().count_default_procs(), 2);
    assert!(registry.substrate().calls().contains(&SubstrateCall::DefaultProc {
        window: native,
        message: Message::close(),
    }));
}

#[test]
fn test_untracked_notification_for_unknown_window_is_forwarded() {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    let stranger = NativeHandle::from_raw(0xdead);

    assert_eq!(registry.dispatch(stranger, Message::close()), 0);
    assert_eq!(registry.substrate().count_default_procs(), 1);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "untracked window")]
fn test_tracked_notification_for_unknown_window_panics_in_debug() {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    registry.dispatch(NativeHandle::from_raw(0xdead), Message::destroy());
}

#[cfg(not(debug_assertions))]
#[test]
fn test_tracked_notification_for_unknown_window_is_forwarded_in_release() {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    assert_eq!(
        registry.dispatch(NativeHandle::from_raw(0xdead), Message::destroy()),
        0
    );
    assert_eq!(registry.substrate().count_default_procs(), 1);
}

#[test]
fn test_pump_empty_queue_continues() {
    let mut registry = WindowRegistry::new(HeadlessSubstrate::new());
    assert_eq!(registry.pump(), PumpStatus::Continue);
    assert_eq!(registry.pump(), PumpStatus::Continue);
}

#[test]
fn test_pump_quits_only_on_quit() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(10, 10));

    registry.substrate().post(native, Message::close());
    registry.substrate().post(native, Message::exit_size_move());
    assert_eq!(registry.pump(), PumpStatus::Continue);

    registry.substrate().close(native);
    registry.substrate().post_quit(3);
    registry.substrate().post_quit(4);

    assert_eq!(registry.pump(), PumpStatus::Quit { exit_code: 3 });
    assert_eq!(registry.is_closed(window), Ok(true));
    // Anything behind the quit is left for the next pump.
    assert_eq!(registry.substrate().pending_messages(), 1);
    assert_eq!(registry.pump(), PumpStatus::Quit { exit_code: 4 });
}

#[test]
fn test_destroy_discards_pending_notifications() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(10, 10));
    let other = registry.create(&WindowConfig::new().with_size(10, 10)).unwrap();
    let other_native = registry.native_handle(other).unwrap();

    registry.substrate().post(native, Message::exit_size_move());
    registry.substrate().post(other_native, Message::destroy());
    assert!(registry.destroy(window));

    assert_eq!(registry.substrate().pending_messages(), 1);
    assert_eq!(registry.pump(), PumpStatus::Continue);
    assert_eq!(registry.is_closed(other), Ok(true));
}

#[test]
fn test_destroy_before_close_is_delivered() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(10, 10));

    registry.substrate().close(native);
    assert!(registry.destroy(window));
    assert_eq!(registry.substrate().count_destroys(), 1);

    assert_eq!(registry.substrate().pending_messages(), 0);
    assert_eq!(registry.pump(), PumpStatus::Continue);
}

#[test]
fn test_closed_window_is_released_by_substrate() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(10, 10));

    registry.substrate().close(native);
    registry.pump();
    assert_eq!(registry.substrate().outer_rect(native), None);
    assert_eq!(registry.handle_for(native), None);

    // The registry still tracks it until destroyed.
    assert_eq!(registry.mode(window), Ok(WindowMode::Closed));
    assert!(registry.destroy(window));
    assert_eq!(registry.substrate().count_destroys(), 0);
}

#[test]
fn test_handle_for_rejects_reused_native_data() {
    let (mut registry, window, native) = setup(WindowConfig::new().with_size(10, 10));
    assert_eq!(registry.handle_for(native), Some(window));

    registry.destroy(window);
    assert_eq!(registry.handle_for(native), None);
    assert_eq!(registry.handle_for(NativeHandle::NULL), None);
}
