//! Capabilities the core borrows from its surroundings: time, id
//! generation and user confirmation.
//!
//! Each one is a small trait so that tests can run the store headless and
//! deterministic, while the CLI plugs in the real system clock and a
//! terminal prompt.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use time::{Duration, OffsetDateTime};

use crate::NoteId;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<OffsetDateTime>>,
}

impl FixedClock {
    pub fn new(at: OffsetDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(at)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}

/// Source of fresh note ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> NoteId;
}

/// Millisecond Unix timestamps as decimal strings, strictly increasing
/// within one generator even when called twice in the same millisecond.
///
/// # Examples
///
/// ```
/// use jot::{IdGenerator, MonotonicIdGenerator};
///
/// let mut ids = MonotonicIdGenerator::new();
/// let a = ids.next_id();
/// let b = ids.next_id();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonotonicIdGenerator {
    last: i128,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&mut self) -> NoteId {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let next = millis.max(self.last + 1);
        self.last = next;
        NoteId::new(next.to_string())
    }
}

/// Ids of the form `{prefix}{n}` counting up from 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> NoteId {
        let id = NoteId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Asks the user to approve an irreversible action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompts on stdout and reads a `y`/`yes` answer from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{message} [y/N] ").is_err() || stdout.flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }

        is_affirmative(&input)
    }
}

/// Approves everything, for `--yes` and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
