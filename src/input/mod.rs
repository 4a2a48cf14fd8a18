// src/input/mod.rs
//! The blocking input event queue.
//!
//! [`InputQueue`] turns native events from an [`InputDriver`] into
//! normalized [`InputEvent`]s:
//!
//! - keys are translated through the keysym table; releases carry the
//!   negated code, and keys that translate to 0 are dropped;
//! - mouse button presses and releases carry the button (negated on
//!   release) and the pointer position;
//! - wheel steps become presses of the pseudo-buttons
//!   [`BTN_WHEELUP`](crate::keys::BTN_WHEELUP) and
//!   [`BTN_WHEELDOWN`](crate::keys::BTN_WHEELDOWN);
//! - motion carries the position and no button;
//! - timer ticks carry the milliseconds since the queue was created.
//!
//! The queue is Active until the window is closed or the native source
//! fails. It is then Closed for good: every further wait returns the empty
//! event without blocking.

pub mod driver;
pub mod drivers;
pub mod timer;

#[cfg(test)]
mod tests;

pub use driver::{EventPoster, InputDriver, RawEvent};
pub use drivers::{ChannelInputDriver, EventInjector};

use crate::keys::{KeySymbol, MouseButton, BTN_WHEELDOWN, BTN_WHEELUP};
use crate::keysym_table::translate_keysym;
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};
use timer::RepeatingTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    /// No event: the queue is closed.
    #[default]
    None,
    Key,
    Mouse,
    Timer,
}

/// A normalized input event. Fields that do not apply to `kind` are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Key code, positive on press and negative on release.
    pub keycode: i32,
    /// Button code, positive on press and negative on release; 0 for motion.
    pub button: i32,
    pub x: i32,
    pub y: i32,
    /// Timer tick time in milliseconds.
    pub time: u64,
}

impl InputEvent {
    fn key(keycode: i32) -> Self {
        Self {
            kind: EventKind::Key,
            keycode,
            ..Self::default()
        }
    }

    fn mouse(button: i32, x: i32, y: i32) -> Self {
        Self {
            kind: EventKind::Mouse,
            button,
            x,
            y,
            ..Self::default()
        }
    }

    fn timer(time: u64) -> Self {
        Self {
            kind: EventKind::Timer,
            time,
            ..Self::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == EventKind::None
    }

    /// True for key and button releases.
    pub fn is_release(&self) -> bool {
        match self.kind {
            EventKind::Key => self.keycode < 0,
            EventKind::Mouse => self.button < 0,
            _ => false,
        }
    }

    pub fn key_symbol(&self) -> Option<KeySymbol> {
        (self.kind == EventKind::Key).then(|| KeySymbol::from_code(self.keycode))
    }

    pub fn mouse_button(&self) -> Option<MouseButton> {
        if self.kind == EventKind::Mouse {
            MouseButton::from_code(self.button)
        } else {
            None
        }
    }
}

/// What one raw event contributes to the queue.
enum Step {
    Deliver(InputEvent),
    Close,
    Skip,
}

fn normalize(raw: RawEvent) -> Step {
    match raw {
        RawEvent::Quit => Step::Close,
        RawEvent::KeyDown { sym } | RawEvent::KeyUp { sym } => {
            let code = translate_keysym(sym);
            if code == 0 {
                trace!("Dropping key event for keysym {:#x}", sym);
                return Step::Skip;
            }
            let code = if matches!(raw, RawEvent::KeyUp { .. }) {
                -code
            } else {
                code
            };
            Step::Deliver(InputEvent::key(code))
        }
        RawEvent::ButtonDown { button, x, y } => {
            Step::Deliver(InputEvent::mouse(button as i32, x, y))
        }
        RawEvent::ButtonUp { button, x, y } => {
            Step::Deliver(InputEvent::mouse(-(button as i32), x, y))
        }
        RawEvent::Wheel { dy } => {
            let button = if dy > 0 { BTN_WHEELUP } else { BTN_WHEELDOWN };
            Step::Deliver(InputEvent::mouse(button, 0, 0))
        }
        RawEvent::Motion { x, y } => Step::Deliver(InputEvent::mouse(0, x, y)),
        RawEvent::Timer { ticks } => Step::Deliver(InputEvent::timer(ticks)),
        RawEvent::Other => Step::Skip,
    }
}

/// Blocking queue of normalized input events.
pub struct InputQueue<D: InputDriver> {
    driver: D,
    closed: bool,
    timer: Option<RepeatingTimer>,
    epoch: Instant,
}

impl<D: InputDriver> InputQueue<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            closed: false,
            timer: None,
            epoch: Instant::now(),
        }
    }

    /// Blocks until the next event.
    ///
    /// Returns the empty event (`kind == EventKind::None`) when the queue
    /// closes, and immediately on every call after that.
    pub fn wait_next_event(&mut self) -> InputEvent {
        while !self.closed {
            let Some(raw) = self.driver.wait_native_event() else {
                warn!("Native event source ended; closing input queue");
                self.close();
                break;
            };
            match normalize(raw) {
                Step::Deliver(event) => {
                    trace!("Input event: {:?}", event);
                    return event;
                }
                Step::Close => {
                    info!("Quit requested; closing input queue");
                    self.close();
                }
                Step::Skip => {}
            }
        }
        InputEvent::default()
    }

    /// The next event, or `None` once the queue is closed.
    pub fn next_event(&mut self) -> Option<InputEvent> {
        let event = self.wait_next_event();
        (!self.closed).then_some(event)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the repeating timer. Intervals of 0 or less only cancel the
    /// current timer.
    pub fn set_timer(&mut self, interval_ms: i32) {
        if let Some(timer) = self.timer.take() {
            debug!("Cancelling {:?} timer", timer.interval());
            timer.cancel();
        }
        if interval_ms <= 0 {
            return;
        }
        let interval = Duration::from_millis(interval_ms as u64);
        let started = self
            .driver
            .poster()
            .and_then(|poster| RepeatingTimer::start(interval, poster, self.epoch));
        match started {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => warn!("Failed to start {} ms timer: {:#}", interval_ms, e),
        }
    }

    /// Whether a repeating timer is running.
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn close(&mut self) {
        self.closed = true;
        self.timer = None;
    }
}

impl<D: InputDriver> Iterator for InputQueue<D> {
    type Item = InputEvent;

    fn next(&mut self) -> Option<InputEvent> {
        self.next_event()
    }
}
