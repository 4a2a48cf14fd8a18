//! Headless display driver implementation.
//!
//! Keeps the last presented frame in memory instead of showing it, and
//! records pointer requests, so display code can run and be inspected without
//! a window system.

use crate::display::driver::{DisplayDriver, WindowSpec};
use crate::surface::Surface;
use anyhow::{bail, Result};
use log::{info, trace};

#[derive(Debug, Default)]
pub struct HeadlessDisplayDriver {
    window: Option<WindowSpec>,
    last_frame: Option<Surface>,
    frames_presented: usize,
    cursor_visible: bool,
    cursor_warps: Vec<(i32, i32)>,
}

impl HeadlessDisplayDriver {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Self::default()
        }
    }

    pub fn window(&self) -> Option<&WindowSpec> {
        self.window.as_ref()
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&Surface> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Every pointer warp requested so far, oldest first.
    pub fn cursor_warps(&self) -> &[(i32, i32)] {
        &self.cursor_warps
    }
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn create_window(&mut self, spec: &WindowSpec) -> Result<()> {
        if spec.width <= 0 || spec.height <= 0 {
            bail!("invalid window size {}x{}", spec.width, spec.height);
        }
        info!(
            "HeadlessDisplayDriver: window '{}' {}x{} (fullscreen: {})",
            spec.title,
            spec.width,
            spec.height,
            spec.fullscreen()
        );
        self.window = Some(spec.clone());
        self.last_frame = None;
        Ok(())
    }

    fn destroy_window(&mut self) {
        if let Some(window) = self.window.take() {
            info!("HeadlessDisplayDriver: window '{}' destroyed", window.title);
        }
        self.last_frame = None;
    }

    fn present(&mut self, surface: &Surface) -> Result<()> {
        let Some(window) = self.window.as_ref() else {
            bail!("present called before a window was created");
        };
        if (surface.width(), surface.height()) != (window.width, window.height) {
            bail!(
                "frame is {}x{} but the window is {}x{}",
                surface.width(),
                surface.height(),
                window.width,
                window.height
            );
        }
        trace!("HeadlessDisplayDriver: Presenting frame {}", self.frames_presented);
        match self.last_frame.as_mut() {
            Some(frame) => frame.clone_from(surface),
            None => self.last_frame = Some(surface.clone()),
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn warp_cursor(&mut self, x: i32, y: i32) {
        self.cursor_warps.push((x, y));
    }
}
