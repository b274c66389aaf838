//! Timers
//!
//! setTimeout/clearTimeout on a virtual millisecond clock driven by the
//! host. Every timer has a handle so it can be cancelled.

use lumen_dom::NodeId;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

/// Deferred work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Empty the announcer's live region
    ClearAnnouncement,
    /// Drop the temporary tabindex a skip link put on its target
    RemoveTabIndex(NodeId),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    task: TimerTask,
    deadline_ms: u64,
}

/// Timer manager
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u32,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` from now
    pub fn set_timeout(&mut self, task: TimerTask, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            task,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or never existed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Move the clock forward and take every timer that came due, in
    /// deadline order (ties in scheduling order)
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<(TimerId, TimerTask)> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;

        let mut due: Vec<Timer> = Vec::new();
        self.timers.retain(|t| {
            if t.deadline_ms <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.deadline_ms, t.id));
        due.into_iter().map(|t| (t.id, t.task)).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Time until the next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .iter()
            .map(|t| t.deadline_ms.saturating_sub(self.now_ms))
            .min()
    }
}
