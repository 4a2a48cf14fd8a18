//! Channel-backed input driver.
//!
//! Events come from [`EventInjector`] handles instead of a window system.
//! Used headless, in tests, and by programs that synthesize their own input.

use crate::input::driver::{EventPoster, InputDriver, RawEvent};
use anyhow::{anyhow, Result};
use log::trace;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub struct ChannelInputDriver {
    rx: Receiver<RawEvent>,
    tx: Sender<RawEvent>,
}

/// Sends raw events to a [`ChannelInputDriver`] from any thread.
#[derive(Debug, Clone)]
pub struct EventInjector {
    tx: Sender<RawEvent>,
}

impl ChannelInputDriver {
    pub fn new() -> (Self, EventInjector) {
        let (tx, rx) = mpsc::channel();
        let injector = EventInjector { tx: tx.clone() };
        (Self { rx, tx }, injector)
    }
}

impl EventInjector {
    pub fn send(&self, event: RawEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow!("input driver has been dropped"))
    }
}

impl EventPoster for EventInjector {
    fn post_timer(&self, ticks: u64) -> Result<()> {
        self.send(RawEvent::Timer { ticks })
    }
}

impl InputDriver for ChannelInputDriver {
    fn wait_native_event(&mut self) -> Option<RawEvent> {
        // The driver keeps a sender for timer posters, so the channel never
        // disconnects; callers end the stream with `RawEvent::Quit`.
        let event = self.rx.recv().ok();
        trace!("ChannelInputDriver: {:?}", event);
        event
    }

    fn poster(&self) -> Result<Box<dyn EventPoster>> {
        Ok(Box::new(EventInjector {
            tx: self.tx.clone(),
        }))
    }
}
