//! Debounce gate for suggestion lookups.

use std::time::{Duration, Instant};

/// Minimum trimmed query length that triggers a lookup.
pub const MIN_QUERY_LEN: usize = 2;

/// Outcome of feeding one keystroke into the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Query too short: close the suggestion session, schedule nothing.
    CloseSession,
    /// A lookup is armed; any earlier schedule was discarded.
    Armed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    query: String,
    seq: u64,
    deadline: Instant,
}

/// Delays suggestion lookups until the input stream has been quiet for
/// the configured period.
///
/// At most one lookup is pending at a time; only the most recent query is
/// ever issued. Every keystroke bumps a sequence counter, so a lookup
/// that was already in flight when the input changed resolves stale and
/// gets discarded by the controller.
#[derive(Debug)]
pub struct DebounceGate {
    quiet: Duration,
    pending: Option<Pending>,
    seq: u64,
}

impl DebounceGate {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            seq: 0,
        }
    }

    pub fn on_input(&mut self, text: &str, now: Instant) -> GateAction {
        self.invalidate();

        let query = text.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return GateAction::CloseSession;
        }

        self.pending = Some(Pending {
            query: query.to_string(),
            seq: self.seq,
            deadline: now + self.quiet,
        });
        GateAction::Armed
    }

    /// Deadline of the armed lookup, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fire the armed lookup once its quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> Option<(String, u64)> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| (p.query, p.seq))
        } else {
            None
        }
    }

    /// True when `seq` identifies the most recently issued lookup.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    /// Cancel any armed lookup and mark every issued lookup stale.
    pub fn invalidate(&mut self) {
        self.pending = None;
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> DebounceGate {
        DebounceGate::new(Duration::from_millis(300))
    }

    #[test]
    fn short_query_closes_and_schedules_nothing() {
        let mut gate = gate();
        let now = Instant::now();

        assert_eq!(gate.on_input("l", now), GateAction::CloseSession);
        assert_eq!(gate.deadline(), None);
        assert_eq!(gate.fire(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn length_check_uses_trimmed_text() {
        let mut gate = gate();
        let now = Instant::now();

        assert_eq!(gate.on_input("  l  ", now), GateAction::CloseSession);
        assert_eq!(gate.on_input(" lo ", now), GateAction::Armed);
    }

    #[test]
    fn rapid_inputs_issue_one_lookup_for_final_text() {
        let mut gate = gate();
        let t0 = Instant::now();

        assert_eq!(gate.on_input("lo", t0), GateAction::Armed);
        assert_eq!(gate.on_input("lon", t0 + Duration::from_millis(100)), GateAction::Armed);
        assert_eq!(gate.on_input("lond", t0 + Duration::from_millis(200)), GateAction::Armed);

        // The first two schedules were discarded.
        let deadline = gate.deadline().expect("lookup armed");
        assert_eq!(deadline, t0 + Duration::from_millis(500));
        assert_eq!(gate.fire(t0 + Duration::from_millis(499)), None);

        let (query, seq) = gate.fire(deadline).expect("quiet period elapsed");
        assert_eq!(query, "lond");
        assert!(gate.is_current(seq));

        // Nothing left to fire.
        assert_eq!(gate.fire(deadline + Duration::from_secs(1)), None);
    }

    #[test]
    fn newer_input_marks_issued_lookup_stale() {
        let mut gate = gate();
        let t0 = Instant::now();

        gate.on_input("lo", t0);
        let (_, seq) = gate.fire(t0 + Duration::from_millis(300)).expect("fires");
        assert!(gate.is_current(seq));

        gate.on_input("lond", t0 + Duration::from_millis(400));
        assert!(!gate.is_current(seq));
    }

    #[test]
    fn short_input_marks_issued_lookup_stale() {
        let mut gate = gate();
        let t0 = Instant::now();

        gate.on_input("lo", t0);
        let (_, seq) = gate.fire(t0 + Duration::from_millis(300)).expect("fires");

        gate.on_input("l", t0 + Duration::from_millis(400));
        assert!(!gate.is_current(seq));
    }

    #[test]
    fn invalidate_cancels_armed_lookup() {
        let mut gate = gate();
        let t0 = Instant::now();

        gate.on_input("lo", t0);
        gate.invalidate();

        assert_eq!(gate.deadline(), None);
        assert_eq!(gate.fire(t0 + Duration::from_secs(1)), None);
    }
}
