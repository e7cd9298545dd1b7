//! Frame-driven one-shot timers.
//!
//! Timers carry plain data events instead of callbacks. The owner advances the
//! scheduler with the frame delta and handles whatever comes due. Each timer
//! holds a `CancelToken`; cancelling the token drops every timer sharing it.

use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<E> {
    id: TimerId,
    due: f64,
    token: CancelToken,
    event: E,
}

#[derive(Debug)]
pub struct Scheduler<E> {
    now: f64,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<E> Scheduler<E> {
    /// Fire `event` once `delay_sec` of frame time has elapsed.
    pub fn schedule(&mut self, delay_sec: f64, token: &CancelToken, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due: self.now + delay_sec.max(0.0),
            token: token.clone(),
            event,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Advance the clock and return due, uncancelled events ordered by due
    /// time. Cancelled timers are discarded.
    pub fn advance(&mut self, dt_sec: f64) -> SmallVec<[E; 2]> {
        self.now += dt_sec.max(0.0);
        self.timers.retain(|t| !t.token.is_cancelled());

        let now = self.now;
        let mut due: Vec<Timer<E>> = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due <= now {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|t| t.event).collect()
    }

    /// Timers not yet fired or discarded.
    pub fn pending_len(&self) -> usize {
        self.timers
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .count()
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }
}
