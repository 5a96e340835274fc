//! Cancellation for scheduled continuations
//!
//! The host drives the game through two kinds of deferred callbacks: the
//! per-frame continuation (requestAnimationFrame) and the countdown interval.
//! Each one carries a `Ticket` stamped with the epoch it was issued in. Every
//! state transition advances the epoch, so a callback that fires after a
//! reset, restart or resize finds its ticket stale and does nothing.
//!
//! `TaskSlots` is the host-side half: it remembers the native handle of the
//! pending callback of each kind so the host can actually cancel it.

/// Kind of scheduled continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Frame,
    Countdown,
}

/// Permission for one continuation to act on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    kind: TaskKind,
}

impl Ticket {
    pub fn kind(&self) -> TaskKind {
        self.kind
    }
}

/// Anything that can tell whether a ticket is still valid
pub trait Liveness {
    fn is_live(&self, ticket: Ticket) -> bool;
}

/// Monotonic epoch counter owned by the state machine
#[derive(Debug, Default)]
pub struct Epochs {
    current: u64,
}

impl Epochs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every outstanding ticket
    pub fn advance(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    /// Issue a ticket valid until the next `advance`
    pub fn issue(&self, kind: TaskKind) -> Ticket {
        Ticket {
            epoch: self.current,
            kind,
        }
    }

    pub fn is_live(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.current
    }
}

impl Liveness for Epochs {
    fn is_live(&self, ticket: Ticket) -> bool {
        Epochs::is_live(self, ticket)
    }
}

/// Pending host handles, one per task kind
#[derive(Debug)]
pub struct TaskSlots<H> {
    frame: Option<(Ticket, H)>,
    countdown: Option<(Ticket, H)>,
}

impl<H> Default for TaskSlots<H> {
    fn default() -> Self {
        Self {
            frame: None,
            countdown: None,
        }
    }
}

impl<H> TaskSlots<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: TaskKind) -> &mut Option<(Ticket, H)> {
        match kind {
            TaskKind::Frame => &mut self.frame,
            TaskKind::Countdown => &mut self.countdown,
        }
    }

    /// Record the handle for a newly scheduled task
    ///
    /// Returns the previous handle of the same kind, which the caller must
    /// cancel.
    pub fn replace(&mut self, ticket: Ticket, handle: H) -> Option<H> {
        self.slot(ticket.kind)
            .replace((ticket, handle))
            .map(|(_, old)| old)
    }

    /// Forget a task that finished on its own
    pub fn clear(&mut self, kind: TaskKind) -> Option<H> {
        self.slot(kind).take().map(|(_, h)| h)
    }

    /// Remove every task whose ticket is no longer live, returning the
    /// handles to cancel
    pub fn take_stale<L: Liveness + ?Sized>(&mut self, live: &L) -> Vec<(TaskKind, H)> {
        let mut stale = Vec::new();
        for kind in [TaskKind::Frame, TaskKind::Countdown] {
            let slot = self.slot(kind);
            if slot.as_ref().is_some_and(|(t, _)| !live.is_live(*t)) {
                if let Some((_, handle)) = slot.take() {
                    stale.push((kind, handle));
                }
            }
        }
        stale
    }
}
