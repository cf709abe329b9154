//! Substrate notifications.

/// Notification codes and parameter values, numerically equal to the ones
/// the native substrate delivers.
pub mod codes {
    pub const DESTROY: u32 = 0x0002;
    pub const SIZE: u32 = 0x0005;
    pub const CLOSE: u32 = 0x0010;
    pub const QUIT: u32 = 0x0012;
    pub const SYS_CHAR: u32 = 0x0106;
    pub const SYS_COMMAND: u32 = 0x0112;
    pub const EXIT_SIZE_MOVE: u32 = 0x0232;

    /// `wparam` of [`SIZE`] when the window was maximized.
    pub const SIZE_RESTORED: usize = 0;
    pub const SIZE_MINIMIZED: usize = 1;
    pub const SIZE_MAXIMIZED: usize = 2;

    /// `wparam` of [`SYS_COMMAND`] for "restore" from the system menu.
    pub const SC_RESTORE: usize = 0xF120;
    pub const SC_MAXIMIZE: usize = 0xF030;
}

/// One notification: a code plus its two opaque parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Message {
    pub code: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl Message {
    pub const fn new(code: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            code,
            wparam,
            lparam,
        }
    }

    /// The native window is being destroyed.
    pub const fn destroy() -> Self {
        Self::new(codes::DESTROY, 0, 0)
    }

    /// The user asked to close the window.
    pub const fn close() -> Self {
        Self::new(codes::CLOSE, 0, 0)
    }

    /// The user finished an interactive move or resize.
    pub const fn exit_size_move() -> Self {
        Self::new(codes::EXIT_SIZE_MOVE, 0, 0)
    }

    /// The client area changed size. `kind` is one of the `SIZE_*` codes.
    pub const fn size(kind: usize, width: u16, height: u16) -> Self {
        Self::new(
            codes::SIZE,
            kind,
            ((height as isize) << 16) | width as isize,
        )
    }

    pub const fn maximized(width: u16, height: u16) -> Self {
        Self::size(codes::SIZE_MAXIMIZED, width, height)
    }

    pub const fn sys_command(command: usize) -> Self {
        Self::new(codes::SYS_COMMAND, command, 0)
    }

    /// "Restore" picked from the system menu.
    pub const fn restore() -> Self {
        Self::sys_command(codes::SC_RESTORE)
    }

    /// Width packed into a [`codes::SIZE`] notification.
    pub const fn size_width(&self) -> u16 {
        (self.lparam & 0xFFFF) as u16
    }

    /// Height packed into a [`codes::SIZE`] notification.
    pub const fn size_height(&self) -> u16 {
        ((self.lparam >> 16) & 0xFFFF) as u16
    }
}
