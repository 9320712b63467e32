//! Open/close lifecycle of the recipe detail drawer.
//!
//! The drawer moves through three phases, each boundary gated by a fixed
//! animation delay:
//!
//! ```text
//! open ──► Entering ──(delay)──► Idle ──close──► Leaving ──(delay)──► Closed
//!              └───────────────close───────────────┘
//! ```
//!
//! Time never flows on its own here. Callers pass `now` from a [`Clock`] and
//! call [`Drawer::tick`]; the drawer only holds the pending deadline, so
//! dropping it drops its timer.

use log::debug;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerPhase {
    Entering,
    Idle,
    Leaving,
}

/// What a tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    /// The enter animation finished
    Settled,
    /// The leave animation finished; the selection should be discarded
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Escape,
    Backdrop,
}

/// `now + delay`, or `now` when the sum does not fit in an `Instant`
fn deadline_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(now)
}

#[derive(Debug, Clone)]
pub struct Drawer {
    phase: DrawerPhase,
    delay: Duration,
    deadline: Option<Instant>,
    closed: bool,
}

impl Drawer {
    pub fn open(now: Instant, delay: Duration) -> Self {
        Self {
            phase: DrawerPhase::Entering,
            delay,
            deadline: Some(deadline_after(now, delay)),
            closed: false,
        }
    }

    pub fn phase(&self) -> DrawerPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start the leave animation.
    ///
    /// Returns `false` when the drawer is already leaving or closed; the
    /// running close timer is left untouched.
    pub fn request_close(&mut self, now: Instant, reason: CloseReason) -> bool {
        if self.phase == DrawerPhase::Leaving || self.closed {
            debug!("Ignoring close request ({:?}) while leaving", reason);
            return false;
        }
        debug!("Closing drawer from {:?} via {:?}", self.phase, reason);
        self.phase = DrawerPhase::Leaving;
        self.deadline = Some(deadline_after(now, self.delay));
        true
    }

    /// Advance at most one phase if its deadline has passed
    pub fn tick(&mut self, now: Instant) -> Option<DrawerEvent> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        match self.phase {
            DrawerPhase::Entering => {
                self.phase = DrawerPhase::Idle;
                Some(DrawerEvent::Settled)
            }
            DrawerPhase::Leaving => {
                self.closed = true;
                Some(DrawerEvent::Closed)
            }
            DrawerPhase::Idle => None,
        }
    }

    /// Time until the next transition, `None` when nothing is scheduled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Animation class applied to the drawer content
    pub fn class_name(&self) -> &'static str {
        match self.phase {
            DrawerPhase::Entering => "enter",
            DrawerPhase::Idle => "idle",
            DrawerPhase::Leaving => "leave",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(700);

    #[test]
    fn test_enters_then_settles() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        assert_eq!(drawer.phase(), DrawerPhase::Entering);
        assert_eq!(drawer.class_name(), "enter");

        clock.advance(Duration::from_millis(699));
        assert_eq!(drawer.tick(clock.now()), None);
        assert_eq!(drawer.phase(), DrawerPhase::Entering);

        clock.advance(Duration::from_millis(1));
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Settled));
        assert_eq!(drawer.phase(), DrawerPhase::Idle);
        assert_eq!(drawer.remaining(clock.now()), None);
    }

    #[test]
    fn test_late_tick_does_not_skip_phases() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        clock.advance(Duration::from_secs(10));
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Settled));
        assert_eq!(drawer.tick(clock.now()), None);
        assert!(!drawer.is_closed());
    }

    #[test]
    fn test_close_from_idle() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        clock.advance(DELAY);
        drawer.tick(clock.now());

        assert!(drawer.request_close(clock.now(), CloseReason::Escape));
        assert_eq!(drawer.phase(), DrawerPhase::Leaving);
        assert_eq!(drawer.remaining(clock.now()), Some(DELAY));

        clock.advance(DELAY);
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Closed));
        assert!(drawer.is_closed());
        assert_eq!(drawer.tick(clock.now()), None);
    }

    #[test]
    fn test_second_close_keeps_original_deadline() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        clock.advance(DELAY);
        drawer.tick(clock.now());

        assert!(drawer.request_close(clock.now(), CloseReason::Button));
        clock.advance(Duration::from_millis(400));
        assert!(!drawer.request_close(clock.now(), CloseReason::Backdrop));
        assert_eq!(
            drawer.remaining(clock.now()),
            Some(Duration::from_millis(300))
        );

        clock.advance(Duration::from_millis(300));
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Closed));
    }

    #[test]
    fn test_close_while_entering_cancels_enter_timer() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        clock.advance(Duration::from_millis(200));

        assert!(drawer.request_close(clock.now(), CloseReason::Escape));
        clock.advance(Duration::from_millis(500));
        // The old enter deadline has passed but must not settle the drawer
        assert_eq!(drawer.tick(clock.now()), None);
        assert_eq!(drawer.phase(), DrawerPhase::Leaving);

        clock.advance(Duration::from_millis(200));
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Closed));
    }

    #[test]
    fn test_close_after_closed_is_noop() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), DELAY);
        drawer.request_close(clock.now(), CloseReason::Button);
        clock.advance(DELAY);
        drawer.tick(clock.now());

        assert!(!drawer.request_close(clock.now(), CloseReason::Button));
        assert_eq!(drawer.remaining(clock.now()), None);
    }

    #[test]
    fn test_unrepresentable_delay_does_not_panic() {
        let clock = ManualClock::new();
        let mut drawer = Drawer::open(clock.now(), Duration::MAX);
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Settled));

        assert!(drawer.request_close(clock.now(), CloseReason::Button));
        assert_eq!(drawer.remaining(clock.now()), Some(Duration::ZERO));
        assert_eq!(drawer.tick(clock.now()), Some(DrawerEvent::Closed));
    }
}
