// src/input/tests.rs

use super::*;
use crate::keys::{BTN_LEFT, BTN_RIGHT, KEY_ESCAPE, KEY_UP};
use std::collections::VecDeque;
use std::thread;
use test_log::test;

/// Replays a fixed list of raw events, then reports the source as ended.
struct ScriptedDriver {
    events: VecDeque<RawEvent>,
    waits: usize,
}

impl ScriptedDriver {
    fn new(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            waits: 0,
        }
    }
}

impl InputDriver for ScriptedDriver {
    fn wait_native_event(&mut self) -> Option<RawEvent> {
        self.waits += 1;
        self.events.pop_front()
    }

    fn poster(&self) -> anyhow::Result<Box<dyn EventPoster>> {
        anyhow::bail!("scripted driver has no timer support")
    }
}

fn queue(events: impl IntoIterator<Item = RawEvent>) -> InputQueue<ScriptedDriver> {
    InputQueue::new(ScriptedDriver::new(events))
}

#[test]
fn key_press_and_release_are_signed() {
    let mut q = queue([
        RawEvent::KeyDown { sym: 0xff52 },
        RawEvent::KeyUp { sym: 0xff52 },
        RawEvent::KeyDown { sym: 'a' as u32 },
    ]);
    let down = q.wait_next_event();
    assert_eq!((down.kind, down.keycode), (EventKind::Key, KEY_UP));
    assert!(!down.is_release());
    let up = q.wait_next_event();
    assert_eq!(up.keycode, -KEY_UP);
    assert!(up.is_release());
    assert_eq!(up.key_symbol(), Some(KeySymbol::Up));
    assert_eq!(q.wait_next_event().keycode, 'a' as i32);
}

#[test]
fn keys_translating_to_zero_are_dropped() {
    // Pause and Print have no key code.
    let mut q = queue([
        RawEvent::KeyDown { sym: 0xff13 },
        RawEvent::KeyUp { sym: 0xff61 },
        RawEvent::Other,
        RawEvent::KeyDown { sym: 0xff1b },
    ]);
    let event = q.wait_next_event();
    assert_eq!(event.keycode, KEY_ESCAPE);
    assert_eq!(q.driver().waits, 4);
}

#[test]
fn buttons_carry_position_and_sign() {
    let mut q = queue([
        RawEvent::ButtonDown { button: 1, x: 10, y: 20 },
        RawEvent::ButtonUp { button: 3, x: 11, y: 21 },
    ]);
    let down = q.wait_next_event();
    assert_eq!(down, InputEvent::mouse(BTN_LEFT, 10, 20));
    assert_eq!(down.mouse_button(), Some(MouseButton::Left));
    let up = q.wait_next_event();
    assert_eq!(up, InputEvent::mouse(-BTN_RIGHT, 11, 21));
    assert!(up.is_release());
}

#[test]
fn wheel_becomes_pseudo_button_without_position() {
    let mut q = queue([RawEvent::Wheel { dy: 2 }, RawEvent::Wheel { dy: -1 }]);
    let up = q.wait_next_event();
    assert_eq!((up.kind, up.button, up.x, up.y), (EventKind::Mouse, BTN_WHEELUP, 0, 0));
    assert_eq!(q.wait_next_event().button, BTN_WHEELDOWN);
}

#[test]
fn motion_has_position_and_no_button() {
    let mut q = queue([RawEvent::Motion { x: 7, y: 9 }]);
    let event = q.wait_next_event();
    assert_eq!((event.kind, event.button, event.x, event.y), (EventKind::Mouse, 0, 7, 9));
    assert_eq!(event.mouse_button(), None);
}

#[test]
fn timer_ticks_carry_time() {
    let mut q = queue([RawEvent::Timer { ticks: 1234 }]);
    let event = q.wait_next_event();
    assert_eq!((event.kind, event.time), (EventKind::Timer, 1234));
}

#[test]
fn quit_closes_for_good() {
    let mut q = queue([
        RawEvent::Quit,
        RawEvent::KeyDown { sym: 'x' as u32 },
    ]);
    assert!(q.wait_next_event().is_none());
    assert!(q.is_closed());
    for _ in 0..3 {
        assert!(q.wait_next_event().is_none());
    }
    assert_eq!(q.driver().waits, 1);
}

#[test]
fn exhausted_source_closes_queue() {
    let mut q = queue([RawEvent::Motion { x: 1, y: 1 }]);
    assert_eq!(q.next_event().map(|e| e.kind), Some(EventKind::Mouse));
    assert_eq!(q.next_event(), None);
    assert!(q.is_closed());
    assert_eq!(q.next_event(), None);
    assert_eq!(q.driver().waits, 2);
}

#[test]
fn iterator_ends_at_quit() {
    let q = queue([
        RawEvent::KeyDown { sym: 'q' as u32 },
        RawEvent::Motion { x: 0, y: 0 },
        RawEvent::Quit,
        RawEvent::KeyDown { sym: 'z' as u32 },
    ]);
    let kinds: Vec<EventKind> = q.map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Key, EventKind::Mouse]);
}

#[test]
fn timer_start_failure_is_soft() {
    let mut q = queue([]);
    q.set_timer(10);
    assert!(!q.has_timer());
}

fn count_timer_events(
    queue: &mut InputQueue<ChannelInputDriver>,
    injector: &EventInjector,
    window: Duration,
) -> Vec<u64> {
    thread::sleep(window);
    queue.set_timer(0);
    injector.send(RawEvent::Quit).unwrap();
    queue
        .by_ref()
        .filter(|e| e.kind == EventKind::Timer)
        .map(|e| e.time)
        .collect()
}

#[test]
fn disabling_timer_stops_events() {
    let (driver, injector) = ChannelInputDriver::new();
    let mut q = InputQueue::new(driver);
    q.set_timer(500);
    assert!(q.has_timer());
    q.set_timer(0);
    assert!(!q.has_timer());
    let ticks = count_timer_events(&mut q, &injector, Duration::from_millis(700));
    assert!(ticks.is_empty(), "unexpected ticks {:?}", ticks);
}

#[test]
fn replacing_timer_leaves_one_active() {
    let (driver, injector) = ChannelInputDriver::new();
    let mut q = InputQueue::new(driver);
    q.set_timer(50);
    q.set_timer(50);
    let ticks = count_timer_events(&mut q, &injector, Duration::from_millis(500));
    // One timer gives about 10 ticks in the window; two would give about 20.
    assert!((5..=13).contains(&ticks.len()), "got {} ticks", ticks.len());
    assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn timer_events_interleave_with_input() {
    let (driver, injector) = ChannelInputDriver::new();
    let mut q = InputQueue::new(driver);
    injector.send(RawEvent::KeyDown { sym: 'k' as u32 }).unwrap();
    q.set_timer(20);
    assert_eq!(q.wait_next_event().kind, EventKind::Key);
    assert_eq!(q.wait_next_event().kind, EventKind::Timer);
    q.set_timer(0);
}

#[test]
fn closing_stops_timer() {
    let (driver, injector) = ChannelInputDriver::new();
    let mut q = InputQueue::new(driver);
    q.set_timer(10);
    injector.send(RawEvent::Quit).unwrap();
    assert!(q.wait_next_event().is_none());
    assert!(!q.has_timer());
}
