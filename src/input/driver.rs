// src/input/driver.rs
//! InputDriver trait - the native event source behind an
//! [`InputQueue`](super::InputQueue).

use anyhow::Result;

/// A native event before normalization.
///
/// Key symbols are X11 keysym values; other backends translate their own
/// key codes into keysyms before handing events over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// The user asked to close the window.
    Quit,
    KeyDown { sym: u32 },
    KeyUp { sym: u32 },
    ButtonDown { button: u8, x: i32, y: i32 },
    ButtonUp { button: u8, x: i32, y: i32 },
    /// Wheel rotation; positive is away from the user.
    Wheel { dy: i32 },
    Motion { x: i32, y: i32 },
    /// A tick of the repeating timer, in milliseconds since the queue was
    /// created.
    Timer { ticks: u64 },
    /// Anything the queue does not care about.
    Other,
}

/// Blocking source of native events.
pub trait InputDriver {
    /// Blocks until the next native event arrives. Returns `None` once the
    /// event source is closed or broken; the queue never calls it again after
    /// that.
    fn wait_native_event(&mut self) -> Option<RawEvent>;

    /// Creates a handle that injects timer events into this driver's queue
    /// from another thread.
    fn poster(&self) -> Result<Box<dyn EventPoster>>;
}

/// Cross-thread injection of synthetic timer events.
///
/// Implementations post into the same native queue that real input arrives
/// on, so timer ticks interleave with input in arrival order.
pub trait EventPoster: Send {
    fn post_timer(&self, ticks: u64) -> Result<()>;
}
