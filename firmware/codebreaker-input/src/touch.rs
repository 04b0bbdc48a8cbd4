//! Touch input channel
//!
//! The touch controller raises an interrupt on pen-down; the handler stores
//! the reading here and the main loop consumes it with [`TouchInputChannel::take`].
//! At most one event is buffered. A second touch before the first is consumed
//! replaces the coordinate and leaves the event pending.

use core::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Sleep between two polls of the channel in every wait loop
pub const POLL_INTERVAL_MS: u32 = 100;

/// Set while an unconsumed event is held in the slot
const PENDING: u64 = 1 << 63;
const X_SHIFT: u32 = 32;
const X_MASK: u64 = 0xFFFF;
const Y_MASK: u64 = 0xFFFF_FFFF;

/// Raw reading as delivered by the touch controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTouch {
    /// Raw X (already scaled to display columns by the controller driver)
    pub x: u16,
    /// Raw Y, origin at the bottom edge
    pub y: u16,
}

impl RawTouch {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Touch position in display space (origin top-left)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchEvent {
    pub x: i32,
    /// Negative when the raw reading lies beyond the display height
    pub y: i32,
}

impl TouchEvent {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Failure reading the touch controller
///
/// Never fatal: the poll cycle that produced it is skipped.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TouchReadError {
    #[error("touch controller bus transfer failed")]
    Bus,
    #[error("pressure below touch threshold")]
    NoPressure,
    #[error("touch controller not responding")]
    Disconnected,
}

/// Poll-style touch delivery
pub trait TouchSource {
    /// Read the controller once, `Ok(None)` when the screen is not touched
    fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError>;
}

/// Source for boards where the interrupt handler feeds the channel directly
#[derive(Clone, Copy, Debug, Default)]
pub struct InterruptDriven;

impl TouchSource for InterruptDriven {
    fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError> {
        Ok(None)
    }
}

impl<S: TouchSource + ?Sized> TouchSource for &mut S {
    fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError> {
        (**self).poll_raw()
    }
}

/// Blocking millisecond delay (timer peripheral, `thread::sleep` on a host)
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Single-slot touch mailbox shared by the interrupt handler and the main loop
///
/// The pending flag and both coordinates live in one `AtomicU64`, so a reader
/// can never pair a fresh flag with a stale coordinate:
///
/// ```text
///  63      48 47        32 31                0
/// +--+-------+------------+-------------------+
/// |P| unused |  x (u16)   |  y (i32, 2's cpl) |
/// +--+-------+------------+-------------------+
/// ```
pub struct TouchInputChannel {
    slot: AtomicU64,
    display_height: u16,
}

impl TouchInputChannel {
    /// Create an empty channel for a display `display_height` pixels tall
    pub const fn new(display_height: u16) -> Self {
        Self {
            slot: AtomicU64::new(0),
            display_height,
        }
    }

    pub fn display_height(&self) -> u16 {
        self.display_height
    }

    /// Interrupt-side entry point
    ///
    /// Flips the reading into display space and publishes it with a single
    /// store. Overwrites any unconsumed event.
    pub fn on_touch(&self, raw: RawTouch) {
        let y = self.display_height as i32 - raw.y as i32;
        let word = PENDING | ((raw.x as u64) << X_SHIFT) | (y as u32 as u64);
        self.slot.store(word, Ordering::Release);
    }

    /// Consume the pending event, if any
    pub fn take(&self) -> Option<TouchEvent> {
        let word = self.slot.swap(0, Ordering::AcqRel);
        if word & PENDING == 0 {
            return None;
        }

        let x = ((word >> X_SHIFT) & X_MASK) as u16 as i32;
        let y = (word & Y_MASK) as u32 as i32;
        Some(TouchEvent::new(x, y))
    }

    pub fn is_pending(&self) -> bool {
        self.slot.load(Ordering::Acquire) & PENDING != 0
    }

    /// Drop a stale event left over from the previous screen
    pub fn clear(&self) {
        self.slot.store(0, Ordering::Release);
    }

    /// Poll `source` once and forward any reading into the slot
    pub fn pump<S: TouchSource>(&self, source: &mut S) {
        match source.poll_raw() {
            Ok(Some(raw)) => self.on_touch(raw),
            Ok(None) => {}
            Err(err) => log::warn!("skipping touch poll: {}", err),
        }
    }

    /// Block until a touch arrives
    ///
    /// Unbounded by design: idle screens wait forever.
    pub fn wait_for_touch<S: TouchSource, D: Delay>(
        &self,
        source: &mut S,
        delay: &mut D,
        interval_ms: u32,
    ) -> TouchEvent {
        loop {
            self.pump(source);
            if let Some(event) = self.take() {
                return event;
            }
            delay.delay_ms(interval_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    struct Scripted(VecDeque<Result<Option<RawTouch>, TouchReadError>>);

    impl TouchSource for Scripted {
        fn poll_raw(&mut self) -> Result<Option<RawTouch>, TouchReadError> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }

    #[derive(Default)]
    struct CountingDelay(Vec<u32>);

    impl Delay for CountingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
        }
    }

    #[test]
    fn test_empty_channel() {
        let channel = TouchInputChannel::new(320);
        assert!(!channel.is_pending());
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn test_y_axis_flip() {
        let channel = TouchInputChannel::new(320);
        channel.on_touch(RawTouch::new(40, 100));

        assert!(channel.is_pending());
        assert_eq!(channel.take(), Some(TouchEvent::new(40, 220)));
        assert_eq!(channel.take(), None);
        assert!(!channel.is_pending());
    }

    #[test]
    fn test_second_touch_overwrites() {
        let channel = TouchInputChannel::new(320);
        channel.on_touch(RawTouch::new(1, 1));
        channel.on_touch(RawTouch::new(200, 10));

        assert_eq!(channel.take(), Some(TouchEvent::new(200, 310)));
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn test_garbage_reading_passes_through() {
        let channel = TouchInputChannel::new(320);
        channel.on_touch(RawTouch::new(u16::MAX, 4000));

        assert_eq!(
            channel.take(),
            Some(TouchEvent::new(u16::MAX as i32, 320 - 4000))
        );
    }

    #[test]
    fn test_clear_discards_pending() {
        let channel = TouchInputChannel::new(320);
        channel.on_touch(RawTouch::new(5, 5));
        channel.clear();
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn test_pump_skips_read_errors() {
        let channel = TouchInputChannel::new(320);
        let mut source = Scripted(VecDeque::from([
            Err(TouchReadError::Bus),
            Ok(None),
            Ok(Some(RawTouch::new(10, 300))),
        ]));

        channel.pump(&mut source);
        assert!(!channel.is_pending());
        channel.pump(&mut source);
        assert!(!channel.is_pending());
        channel.pump(&mut source);
        assert_eq!(channel.take(), Some(TouchEvent::new(10, 20)));
    }

    #[test]
    fn test_wait_for_touch_sleeps_between_polls() {
        let channel = TouchInputChannel::new(320);
        let mut source = Scripted(VecDeque::from([
            Ok(None),
            Err(TouchReadError::NoPressure),
            Ok(Some(RawTouch::new(7, 20))),
        ]));
        let mut delay = CountingDelay::default();

        let event = channel.wait_for_touch(&mut source, &mut delay, POLL_INTERVAL_MS);

        assert_eq!(event, TouchEvent::new(7, 300));
        assert_eq!(delay.0, [POLL_INTERVAL_MS, POLL_INTERVAL_MS]);
    }

    #[test]
    fn test_no_torn_reads_under_concurrent_writes() {
        // Every write satisfies y_display = height - x, so a torn read would
        // show up as a pair violating that relation.
        let channel = TouchInputChannel::new(4096);
        let mut seen = 0;

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..20_000u16 {
                    let v = i % 4096;
                    channel.on_touch(RawTouch::new(v, v));
                }
            });

            for _ in 0..20_000 {
                if let Some(event) = channel.take() {
                    assert_eq!(event.y, 4096 - event.x);
                    seen += 1;
                }
            }
        });

        while let Some(event) = channel.take() {
            assert_eq!(event.y, 4096 - event.x);
            seen += 1;
        }
        assert!(seen >= 1);
    }
}
