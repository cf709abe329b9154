//! Integer geometry in substrate (screen pixel) coordinates.
//!
//! Edges are `i32`, so any extent past `i32::MAX` saturates at the edge of
//! the coordinate space instead of overflowing.

/// An edge-based rectangle: `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rectangle of the given size anchored at `origin`.
    pub fn from_origin_size(origin: Pos<i32>, size: Size<u32>) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add_unsigned(size.width),
            bottom: origin.y.saturating_add_unsigned(size.height),
        }
    }

    pub const fn width(&self) -> u32 {
        self.right.abs_diff(self.left)
    }

    pub const fn height(&self) -> u32 {
        self.bottom.abs_diff(self.top)
    }

    pub const fn size(&self) -> Size<u32> {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    pub const fn top_left(&self) -> Pos<i32> {
        Pos {
            x: self.left,
            y: self.top,
        }
    }

    /// Keep `left`/`top`, move `right`/`bottom` so the rectangle has `size`.
    pub fn with_size(self, size: Size<u32>) -> Self {
        Self::from_origin_size(self.top_left(), size)
    }

    /// Grow each edge outward by the given insets, saturating at the
    /// bounds of `i32`.
    pub const fn outset(self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: self.left.saturating_sub(left),
            top: self.top.saturating_sub(top),
            right: self.right.saturating_add(right),
            bottom: self.bottom.saturating_add(bottom),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pos<T> {
    pub x: T,
    pub y: T,
}

impl<T> Pos<T> {
    pub const fn new(x: T, y: T) -> Self {
        Pos { x, y }
    }
}
