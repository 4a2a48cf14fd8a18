//! X11 DisplayDriver implementation using Xlib.
//!
//! - Window creation, optionally fullscreen through `_NET_WM_STATE`
//! - Frame presentation via XPutImage straight from the canvas buffer
//! - Pointer visibility and warping

use crate::display::driver::{DisplayDriver, WindowFlags, WindowSpec};
use crate::platform::x11::SharedConnection;
use crate::surface::Surface;
use anyhow::{anyhow, bail, Context, Result};
use libc::{c_char, c_int, c_uint};
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::{mem, ptr};
use x11::xlib;

const BITMAP_PAD: c_int = 32;

#[derive(Debug)]
pub struct X11DisplayDriver {
    conn: SharedConnection,
    window: xlib::Window,
    gc: xlib::GC,
    width: u32,
    height: u32,
    cursor_visible: bool,
}

impl X11DisplayDriver {
    /// Creates a driver on `conn`; the window is created by
    /// [`DisplayDriver::create_window`].
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            window: 0,
            gc: ptr::null_mut(),
            width: 0,
            height: 0,
            cursor_visible: true,
        }
    }

    fn release_window(&mut self) {
        if self.window == 0 {
            return;
        }
        let display = self.conn.display();
        info!("Destroying X11 window (ID: {}).", self.window);
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(display, self.gc);
            }
            xlib::XDestroyWindow(display, self.window);
            xlib::XFlush(display);
        }
        self.gc = ptr::null_mut();
        self.window = 0;
        self.conn.set_window(0);
    }

    /// Asks the window manager for fullscreen before the window is mapped.
    fn request_fullscreen(&self) {
        let atoms = self.conn.atoms();
        let state = [atoms.net_wm_state_fullscreen];
        unsafe {
            xlib::XChangeProperty(
                self.conn.display(),
                self.window,
                atoms.net_wm_state,
                xlib::XA_ATOM,
                32,
                xlib::PropModeReplace,
                state.as_ptr() as *const u8,
                state.len() as c_int,
            );
        }
    }

    fn set_invisible_cursor(&self) {
        let display = self.conn.display();
        unsafe {
            let mut color: xlib::XColor = mem::zeroed();
            let pixmap = xlib::XCreatePixmap(display, self.window, 1, 1, 1);
            if pixmap == 0 {
                warn!("Failed to create 1x1 pixmap for invisible cursor.");
                return;
            }
            let cursor =
                xlib::XCreatePixmapCursor(display, pixmap, pixmap, &mut color, &mut color, 0, 0);
            if cursor != 0 {
                xlib::XDefineCursor(display, self.window, cursor);
                xlib::XFreeCursor(display, cursor);
            } else {
                warn!("Failed to create invisible pixmap cursor.");
            }
            xlib::XFreePixmap(display, pixmap);
        }
    }
}

impl DisplayDriver for X11DisplayDriver {
    fn create_window(&mut self, spec: &WindowSpec) -> Result<()> {
        if spec.width <= 0 || spec.height <= 0 {
            bail!("invalid window size {}x{}", spec.width, spec.height);
        }
        self.release_window();

        let display = self.conn.display();
        let screen = self.conn.screen();
        let title = CString::new(spec.title.as_str()).context("window title contains NUL")?;
        let (x, y) = if spec.flags.contains(WindowFlags::CENTERED) {
            let (sw, sh) = self.conn.screen_size();
            ((sw - spec.width).max(0) / 2, (sh - spec.height).max(0) / 2)
        } else {
            (0, 0)
        };

        unsafe {
            let root = xlib::XRootWindow(display, screen);
            let window = xlib::XCreateSimpleWindow(
                display,
                root,
                x,
                y,
                spec.width as c_uint,
                spec.height as c_uint,
                0,
                xlib::XBlackPixel(display, screen),
                xlib::XBlackPixel(display, screen),
            );
            if window == 0 {
                return Err(anyhow!("Failed to create X11 window"));
            }
            self.window = window;
            self.conn.set_window(window);

            xlib::XStoreName(display, window, title.as_ptr() as *const c_char);
            xlib::XSelectInput(
                display,
                window,
                xlib::ExposureMask
                    | xlib::KeyPressMask
                    | xlib::KeyReleaseMask
                    | xlib::ButtonPressMask
                    | xlib::ButtonReleaseMask
                    | xlib::PointerMotionMask
                    | xlib::StructureNotifyMask,
            );

            // A fixed-size window: min and max size hints equal the canvas.
            let hints = xlib::XAllocSizeHints();
            if !hints.is_null() {
                (*hints).flags = xlib::PMinSize | xlib::PMaxSize | xlib::PPosition;
                (*hints).x = x;
                (*hints).y = y;
                (*hints).min_width = spec.width;
                (*hints).max_width = spec.width;
                (*hints).min_height = spec.height;
                (*hints).max_height = spec.height;
                xlib::XSetWMNormalHints(display, window, hints);
                xlib::XFree(hints as *mut _);
            }

            let mut wm_delete_window = self.conn.atoms().wm_delete_window;
            xlib::XSetWMProtocols(display, window, &mut wm_delete_window, 1);

            self.gc = xlib::XCreateGC(display, window, 0, ptr::null_mut());
        }

        if spec.fullscreen() {
            self.request_fullscreen();
        }
        if !self.cursor_visible {
            self.set_invisible_cursor();
        }

        unsafe {
            xlib::XMapRaised(display, self.window);
            xlib::XFlush(display);
        }
        self.width = spec.width as u32;
        self.height = spec.height as u32;
        info!(
            "X11DisplayDriver: Created window {}x{} at ({}, {})",
            spec.width, spec.height, x, y
        );
        Ok(())
    }

    fn destroy_window(&mut self) {
        self.release_window();
    }

    fn present(&mut self, surface: &Surface) -> Result<()> {
        if self.window == 0 {
            bail!("no window to present to");
        }
        let (w, h) = (surface.width() as u32, surface.height() as u32);
        if (w, h) != (self.width, self.height) {
            bail!(
                "frame is {}x{} but the window is {}x{}",
                w,
                h,
                self.width,
                self.height
            );
        }
        trace!("X11DisplayDriver: Presenting frame");

        let display = self.conn.display();
        unsafe {
            // 0x00RRGGBB words are the native layout of 24/32-bit TrueColor
            // ZPixmaps on little-endian servers.
            let image = xlib::XCreateImage(
                display,
                self.conn.visual(),
                self.conn.depth() as c_uint,
                xlib::ZPixmap,
                0,
                surface.pixels().as_ptr() as *mut c_char,
                w,
                h,
                BITMAP_PAD,
                0,
            );
            if image.is_null() {
                bail!("Failed to create XImage");
            }
            xlib::XPutImage(display, self.window, self.gc, image, 0, 0, 0, 0, w, h);

            // The pixel data belongs to the surface.
            (*image).data = ptr::null_mut();
            xlib::XDestroyImage(image);
            xlib::XFlush(display);
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible == visible {
            return;
        }
        self.cursor_visible = visible;
        if self.window == 0 {
            return;
        }
        if visible {
            unsafe { xlib::XUndefineCursor(self.conn.display(), self.window) };
        } else {
            self.set_invisible_cursor();
        }
        unsafe { xlib::XFlush(self.conn.display()) };
        debug!("Pointer visibility set to {}", visible);
    }

    fn warp_cursor(&mut self, x: i32, y: i32) {
        if self.window == 0 {
            warn!("warp_cursor called without a window");
            return;
        }
        unsafe {
            xlib::XWarpPointer(self.conn.display(), 0, self.window, 0, 0, 0, 0, x, y);
            xlib::XFlush(self.conn.display());
        }
    }
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        self.release_window();
    }
}
