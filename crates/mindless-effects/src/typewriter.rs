//! Typewriter caption state machine.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Lower bound on any step delay, so a zero config value cannot spin.
const MIN_DELAY: Duration = Duration::from_millis(1);

/// Current caption text, written by the typewriter and read by the rain.
///
/// Both sides run on the same frame loop, so a plain `RefCell` is enough.
#[derive(Debug, Clone, Default)]
pub struct SharedCaption(Rc<RefCell<String>>);

impl SharedCaption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published text.
    pub fn set(&self, text: &str) {
        let mut current = self.0.borrow_mut();
        current.clear();
        current.push_str(text);
    }

    /// Copy of the published text.
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    /// Borrow the published text for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.0.borrow())
    }
}

/// Phase of the typing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausedAfterType,
    Deleting,
    PausedAfterDelete,
}

/// Delays between typewriter steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub pause_after_type: Duration,
    pub pause_after_delete: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(100),
            delete_interval: Duration::from_millis(50),
            pause_after_type: Duration::from_millis(2000),
            pause_after_delete: Duration::from_millis(500),
        }
    }
}

/// Types a fixed caption one character at a time, pauses, deletes it and
/// pauses again, forever.
///
/// There is at most one pending step (the deadline). Each step arms the next
/// deadline relative to the one that just expired, so the cycle does not
/// drift with frame timing.
#[derive(Debug)]
pub struct Typewriter {
    target: Vec<char>,
    shown: usize,
    phase: Phase,
    timing: TypewriterTiming,
    deadline: Option<Duration>,
    caption: SharedCaption,
}

impl Typewriter {
    /// Create a stopped typewriter with nothing displayed.
    pub fn new(target: &str, timing: TypewriterTiming, caption: SharedCaption) -> Self {
        let target: Vec<char> = target.chars().collect();
        let phase = if target.is_empty() {
            Phase::PausedAfterType
        } else {
            Phase::Typing
        };
        caption.set("");
        Self {
            target,
            shown: 0,
            phase,
            timing,
            deadline: None,
            caption,
        }
    }

    /// Arm the pending step relative to `now`. No-op if already running.
    pub fn start(&mut self, now: Duration) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay());
        }
    }

    /// Cancel the pending step. The displayed text is kept.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Currently displayed prefix of the target.
    pub fn displayed(&self) -> String {
        self.target[..self.shown].iter().collect()
    }

    /// Run every step whose deadline is at or before `now`.
    ///
    /// Returns `true` if the displayed text changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = false;
        while let Some(deadline) = self.deadline {
            if deadline > now {
                break;
            }
            changed |= self.step();
            self.deadline = Some(deadline + self.delay());
        }
        if changed {
            self.caption.set(&self.displayed());
        }
        changed
    }

    /// Delay before the next step in the current state, never zero.
    fn delay(&self) -> Duration {
        let delay = match self.phase {
            Phase::Typing => self.timing.type_interval,
            Phase::PausedAfterType => self.timing.pause_after_type,
            Phase::Deleting => self.timing.delete_interval,
            Phase::PausedAfterDelete => self.timing.pause_after_delete,
        };
        delay.max(MIN_DELAY)
    }

    fn step(&mut self) -> bool {
        let before = (self.shown, self.phase);
        match self.phase {
            Phase::Typing => {
                self.shown += 1;
                if self.shown >= self.target.len() {
                    self.phase = Phase::PausedAfterType;
                }
            }
            Phase::PausedAfterType => {
                self.phase = if self.shown > 0 {
                    Phase::Deleting
                } else {
                    Phase::PausedAfterDelete
                };
            }
            Phase::Deleting => {
                self.shown -= 1;
                if self.shown == 0 {
                    self.phase = Phase::PausedAfterDelete;
                }
            }
            Phase::PausedAfterDelete => {
                self.phase = if self.target.is_empty() {
                    Phase::PausedAfterType
                } else {
                    Phase::Typing
                };
            }
        }
        if self.phase != before.1 {
            tracing::trace!(phase = ?self.phase, shown = self.shown, "typewriter phase");
        }
        self.shown != before.0
    }
}
