// src/input/timer.rs
//! The repeating timer thread.
//!
//! The thread sleeps on a stop channel with a deadline, so cancelling wakes
//! it immediately. Deadlines advance by whole intervals from the start time,
//! so ticks do not drift with posting latency.

use super::driver::EventPoster;
use anyhow::{Context, Result};
use log::{debug, trace, warn};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RepeatingTimer {
    interval: Duration,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    /// Starts posting a timer event every `interval`. Each event carries the
    /// milliseconds elapsed since `epoch`.
    pub fn start(interval: Duration, poster: Box<dyn EventPoster>, epoch: Instant) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("canvas-timer".to_string())
            .spawn(move || {
                let mut deadline = Instant::now() + interval;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    let ticks = epoch.elapsed().as_millis() as u64;
                    trace!("Timer tick at {} ms", ticks);
                    if let Err(e) = poster.post_timer(ticks) {
                        warn!("Timer stopped: {:#}", e);
                        break;
                    }
                    deadline += interval;
                    // Skip ticks that were missed entirely.
                    let now = Instant::now();
                    while deadline <= now {
                        deadline += interval;
                    }
                }
                debug!("Timer thread exiting");
            })
            .context("failed to spawn timer thread")?;
        debug!("Started {:?} timer", interval);
        Ok(Self {
            interval,
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the timer and waits for its thread to exit. No event is posted
    /// after this returns.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Timer thread panicked");
            }
        }
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
