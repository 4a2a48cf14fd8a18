//! X11 InputDriver implementation using Xlib.
//!
//! Reads events for the window created by the X11 display driver on the
//! same connection. Timer ticks are `ClientMessage` events that
//! [`X11TimerPoster`] sends to that window from the timer thread.

use crate::input::driver::{EventPoster, InputDriver, RawEvent};
use crate::platform::x11::{ManagedDisplay, SharedConnection};
use anyhow::{bail, Result};
use libc::c_long;
use log::{debug, info, trace, warn};
use std::mem;
use x11::xlib;

/// X11 pointer buttons that report wheel rotation.
const WHEEL_UP_BUTTON: u32 = 4;
const WHEEL_DOWN_BUTTON: u32 = 5;

#[derive(Debug)]
pub struct X11InputDriver {
    conn: SharedConnection,
}

impl X11InputDriver {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn convert_event(&self, event: &xlib::XEvent) -> RawEvent {
        let atoms = self.conn.atoms();
        match event.get_type() {
            xlib::KeyPress | xlib::KeyRelease => {
                let mut key_event: xlib::XKeyEvent = unsafe { event.key };
                // Index 0: the unshifted symbol, so 'a' and 'A' share a code.
                let sym = unsafe { xlib::XLookupKeysym(&mut key_event, 0) } as u32;
                if event.get_type() == xlib::KeyPress {
                    RawEvent::KeyDown { sym }
                } else {
                    RawEvent::KeyUp { sym }
                }
            }
            xlib::ButtonPress => {
                let button_event: xlib::XButtonEvent = unsafe { event.button };
                match button_event.button {
                    WHEEL_UP_BUTTON => RawEvent::Wheel { dy: 1 },
                    WHEEL_DOWN_BUTTON => RawEvent::Wheel { dy: -1 },
                    b => RawEvent::ButtonDown {
                        button: b.min(u8::MAX as u32) as u8,
                        x: button_event.x,
                        y: button_event.y,
                    },
                }
            }
            xlib::ButtonRelease => {
                let button_event: xlib::XButtonEvent = unsafe { event.button };
                match button_event.button {
                    WHEEL_UP_BUTTON | WHEEL_DOWN_BUTTON => RawEvent::Other,
                    b => RawEvent::ButtonUp {
                        button: b.min(u8::MAX as u32) as u8,
                        x: button_event.x,
                        y: button_event.y,
                    },
                }
            }
            xlib::MotionNotify => {
                let motion_event: xlib::XMotionEvent = unsafe { event.motion };
                RawEvent::Motion {
                    x: motion_event.x,
                    y: motion_event.y,
                }
            }
            xlib::ClientMessage => {
                let message: xlib::XClientMessageEvent = unsafe { event.client_message };
                let first = message.data.as_longs()[0];
                if message.message_type == atoms.timer {
                    RawEvent::Timer {
                        ticks: first as u64,
                    }
                } else if message.message_type == atoms.wm_protocols
                    && first as xlib::Atom == atoms.wm_delete_window
                {
                    info!("WM_DELETE_WINDOW received");
                    RawEvent::Quit
                } else {
                    trace!(
                        "Ignored ClientMessage (type: {}) on window {}",
                        message.message_type,
                        message.window
                    );
                    RawEvent::Other
                }
            }
            xlib::DestroyNotify => RawEvent::Quit,
            _ => RawEvent::Other,
        }
    }
}

impl InputDriver for X11InputDriver {
    fn wait_native_event(&mut self) -> Option<RawEvent> {
        if self.conn.window() == 0 {
            warn!("No X11 window to read events from");
            return None;
        }
        let mut event: xlib::XEvent = unsafe { mem::zeroed() };
        unsafe { xlib::XNextEvent(self.conn.display(), &mut event) };
        Some(self.convert_event(&event))
    }

    fn poster(&self) -> Result<Box<dyn EventPoster>> {
        let window = self.conn.window();
        if window == 0 {
            bail!("cannot post timer events before a window exists");
        }
        Ok(Box::new(X11TimerPoster::open(window, self.conn.atoms().timer)?))
    }
}

/// Sends timer `ClientMessage`s to a window over a private connection.
#[derive(Debug)]
pub struct X11TimerPoster {
    display: ManagedDisplay,
    window: xlib::Window,
    message_type: xlib::Atom,
}

// The private connection is used only by the thread that owns the poster.
unsafe impl Send for X11TimerPoster {}

impl X11TimerPoster {
    pub fn open(window: xlib::Window, message_type: xlib::Atom) -> Result<Self> {
        let display = ManagedDisplay::open()?;
        debug!("Opened timer connection for window {}", window);
        Ok(Self {
            display,
            window,
            message_type,
        })
    }
}

impl EventPoster for X11TimerPoster {
    fn post_timer(&self, ticks: u64) -> Result<()> {
        let mut message: xlib::XClientMessageEvent = unsafe { mem::zeroed() };
        message.type_ = xlib::ClientMessage;
        message.window = self.window;
        message.message_type = self.message_type;
        message.format = 32;
        message.data.set_long(0, ticks as c_long);

        let mut event = xlib::XEvent::from(message);
        let status = unsafe {
            xlib::XSendEvent(
                self.display.raw(),
                self.window,
                xlib::False,
                xlib::NoEventMask,
                &mut event,
            )
        };
        unsafe { xlib::XFlush(self.display.raw()) };
        if status == 0 {
            bail!("XSendEvent failed for window {}", self.window);
        }
        Ok(())
    }
}
