// src/display/driver.rs
//! DisplayDriver trait - the window backend behind a [`Display`](super::Display).
//!
//! The canvas owns the pixel buffer; the driver only owns the native window
//! and knows how to copy a finished buffer onto it. Drivers are created
//! unconnected and bound to a window by `create_window`; dropping a driver
//! destroys its window.

use anyhow::Result;
use bitflags::bitflags;

bitflags! {
    /// Window creation options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowFlags: u8 {
        /// Cover the whole screen without decorations.
        const FULLSCREEN = 1 << 0;
        /// Center the window on the screen.
        const CENTERED   = 1 << 1;
    }
}

/// What a driver needs to create a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub flags: WindowFlags,
}

impl WindowSpec {
    pub fn new(width: i32, height: i32, title: impl Into<String>, fullscreen: bool) -> Self {
        let mut flags = WindowFlags::CENTERED;
        flags.set(WindowFlags::FULLSCREEN, fullscreen);
        Self {
            width,
            height,
            title: title.into(),
            flags,
        }
    }

    pub fn fullscreen(&self) -> bool {
        self.flags.contains(WindowFlags::FULLSCREEN)
    }
}

/// Minimal platform-specific window interface.
pub trait DisplayDriver {
    /// Creates (or recreates) the native window. A driver holds at most one
    /// window; a second call replaces the first.
    fn create_window(&mut self, spec: &WindowSpec) -> Result<()>;

    /// Destroys the window, if any. Presenting afterwards fails until a new
    /// window is created.
    fn destroy_window(&mut self);

    /// Copies `surface` to the window. The surface is the same size as the
    /// window that was created.
    fn present(&mut self, surface: &crate::surface::Surface) -> Result<()>;

    /// Shows or hides the OS mouse pointer over the window.
    fn set_cursor_visible(&mut self, visible: bool);

    /// Moves the OS mouse pointer to window coordinates (`x`, `y`).
    fn warp_cursor(&mut self, x: i32, y: i32);
}
