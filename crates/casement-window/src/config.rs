use casement_core::geometry::{Pos, Size};

use crate::substrate::{NativeHandle, WindowProc};

/// Client-area size used when a [`WindowConfig`] leaves width or height at 0.
pub const DEFAULT_CLIENT_SIZE: Size<u32> = Size::new(1920, 1080);

/// Registry-wide settings.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Name of the window class registered with the substrate.
    pub class_name: String,
    /// Caption for windows created without one.
    pub default_caption: String,
    /// Client size substituted for a zero width or height.
    pub default_size: Size<u32>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            class_name: "CasementWindow".to_string(),
            default_caption: "Casement Window".to_string(),
            default_size: DEFAULT_CLIENT_SIZE,
        }
    }
}

/// Describes one window to create.
///
/// A zero `width` or `height` falls back to the registry's default size;
/// leaving both `left` and `top` unset lets the substrate pick the position.
/// Sizes past `i32::MAX` are clamped to the coordinate space.
#[derive(Debug, Clone, Default)]
pub struct WindowConfig {
    pub callback: Option<WindowProc>,
    /// Embed the window in this native parent, making it a child window.
    pub parent: Option<NativeHandle>,
    pub caption: Option<String>,
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_position(mut self, left: i32, top: i32) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_parent(mut self, parent: NativeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_callback(mut self, callback: WindowProc) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Requested client size with zero dimensions replaced from `default`.
    pub fn client_size(&self, default: Size<u32>) -> Size<u32> {
        Size::new(
            if self.width == 0 { default.width } else { self.width },
            if self.height == 0 { default.height } else { self.height },
        )
    }

    /// Requested outer position. A missing coordinate is 0 unless both are
    /// missing, in which case the substrate decides.
    pub fn position(&self) -> Option<Pos<i32>> {
        match (self.left, self.top) {
            (None, None) => None,
            (left, top) => Some(Pos::new(left.unwrap_or(0), top.unwrap_or(0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_uses_default() {
        let config = WindowConfig::new();
        assert_eq!(config.client_size(DEFAULT_CLIENT_SIZE), Size::new(1920, 1080));

        let config = WindowConfig::new().with_size(400, 0);
        assert_eq!(config.client_size(DEFAULT_CLIENT_SIZE), Size::new(400, 1080));
    }

    #[test]
    fn test_position() {
        assert_eq!(WindowConfig::new().position(), None);
        assert_eq!(
            WindowConfig::new().with_position(100, 50).position(),
            Some(Pos::new(100, 50))
        );
        let config = WindowConfig {
            top: Some(20),
            ..Default::default()
        };
        assert_eq!(config.position(), Some(Pos::new(0, 20)));
    }
}
