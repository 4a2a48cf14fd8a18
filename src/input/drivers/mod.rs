// src/input/drivers/mod.rs
//! Platform-specific input driver implementations.

pub mod channel;

#[cfg(feature = "x11")]
pub mod x11;

pub use channel::{ChannelInputDriver, EventInjector};

#[cfg(feature = "x11")]
pub use x11::{X11InputDriver, X11TimerPoster};
