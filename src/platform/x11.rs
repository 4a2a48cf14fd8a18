// src/platform/x11.rs

//! The Xlib connection shared by [`X11DisplayDriver`] and [`X11InputDriver`].
//!
//! Window events arrive on the connection that created the window, so the
//! display driver and the input driver must use the same one. They hold it
//! through an `Rc`: an Xlib `Display` is not thread-safe, and this connection
//! never leaves the thread that opened it. The timer thread posts through a
//! separate connection of its own (see [`ManagedDisplay::open`]).
//!
//! [`X11DisplayDriver`]: crate::display::X11DisplayDriver
//! [`X11InputDriver`]: crate::input::drivers::X11InputDriver

use anyhow::{anyhow, Result};
use libc::{c_char, c_int};
use log::{debug, info, warn};
use std::cell::Cell;
use std::ptr;
use std::rc::Rc;
use x11::xlib;

/// An owned Xlib display connection, closed on drop.
#[derive(Debug)]
pub struct ManagedDisplay {
    ptr: *mut xlib::Display,
}

impl ManagedDisplay {
    /// Opens a connection to the server named by `DISPLAY`.
    pub fn open() -> Result<Self> {
        let ptr = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if ptr.is_null() {
            return Err(anyhow!(
                "Failed to open X display. Check DISPLAY environment variable or X server status."
            ));
        }
        debug!("X display opened: {:p}", ptr);
        Ok(Self { ptr })
    }

    #[inline]
    pub fn raw(&self) -> *mut xlib::Display {
        self.ptr
    }

    /// Interns `name`, which must be NUL-terminated.
    pub fn atom(&self, name: &[u8]) -> xlib::Atom {
        debug_assert_eq!(name.last(), Some(&0));
        unsafe { xlib::XInternAtom(self.ptr, name.as_ptr() as *const c_char, xlib::False) }
    }
}

impl Drop for ManagedDisplay {
    fn drop(&mut self) {
        debug!("Closing X display: {:p}", self.ptr);
        unsafe {
            xlib::XCloseDisplay(self.ptr);
        }
    }
}

/// Atoms used by the drivers.
#[derive(Debug, Clone, Copy)]
pub struct Atoms {
    pub wm_protocols: xlib::Atom,
    pub wm_delete_window: xlib::Atom,
    pub net_wm_state: xlib::Atom,
    pub net_wm_state_fullscreen: xlib::Atom,
    /// Message type of the synthetic timer events.
    pub timer: xlib::Atom,
}

impl Atoms {
    pub fn intern(display: &ManagedDisplay) -> Self {
        Self {
            wm_protocols: display.atom(b"WM_PROTOCOLS\0"),
            wm_delete_window: display.atom(b"WM_DELETE_WINDOW\0"),
            net_wm_state: display.atom(b"_NET_WM_STATE\0"),
            net_wm_state_fullscreen: display.atom(b"_NET_WM_STATE_FULLSCREEN\0"),
            timer: display.atom(b"CORE_CANVAS_TIMER\0"),
        }
    }
}

/// The connection to the X server plus the one window created on it.
#[derive(Debug)]
pub struct Connection {
    display: ManagedDisplay,
    screen: c_int,
    visual: *mut xlib::Visual,
    depth: c_int,
    atoms: Atoms,
    window: Cell<xlib::Window>,
}

pub type SharedConnection = Rc<Connection>;

impl Connection {
    pub fn open() -> Result<SharedConnection> {
        info!("Establishing X11 server connection.");
        let display = ManagedDisplay::open()?;
        let screen = unsafe { xlib::XDefaultScreen(display.raw()) };
        let visual = unsafe { xlib::XDefaultVisual(display.raw(), screen) };
        if visual.is_null() {
            return Err(anyhow!("Failed to get default visual for screen {}.", screen));
        }
        let depth = unsafe { xlib::XDefaultDepth(display.raw(), screen) };
        if depth != 24 && depth != 32 {
            warn!("Default visual depth is {}; colors may be wrong", depth);
        }
        let atoms = Atoms::intern(&display);
        info!("X11 connection established (screen {}, depth {}).", screen, depth);
        Ok(Rc::new(Self {
            display,
            screen,
            visual,
            depth,
            atoms,
            window: Cell::new(0),
        }))
    }

    #[inline]
    pub fn display(&self) -> *mut xlib::Display {
        self.display.raw()
    }

    pub fn screen(&self) -> c_int {
        self.screen
    }

    pub fn visual(&self) -> *mut xlib::Visual {
        self.visual
    }

    pub fn depth(&self) -> c_int {
        self.depth
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    /// The current window, or 0 before one is created.
    pub fn window(&self) -> xlib::Window {
        self.window.get()
    }

    pub(crate) fn set_window(&self, window: xlib::Window) {
        self.window.set(window);
    }

    /// Screen size in pixels.
    pub fn screen_size(&self) -> (i32, i32) {
        unsafe {
            (
                xlib::XDisplayWidth(self.display(), self.screen),
                xlib::XDisplayHeight(self.display(), self.screen),
            )
        }
    }
}
