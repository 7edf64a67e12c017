//! Trigger coalescing
//!
//! A touch is often followed by a synthesized click, and held keys repeat. The gate
//! lets at most one trigger through per minimum interval, and swallows the click
//! that follows a touch no matter how long the press lasted.

/// Input that produced a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Key,
    Touch,
    /// Pointer click, including the one a browser synthesizes after a touch
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerGate {
    min_interval_ms: u64,
    last_accepted_ms: Option<u64>,
    /// A touch was seen and its click has not arrived yet
    touch_pending: bool,
}

impl TriggerGate {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
            touch_pending: false,
        }
    }

    /// Accept a trigger at `now_ms` unless it falls inside the interval after the
    /// last accepted one. Rejected triggers do not move the window.
    pub fn try_accept(&mut self, now_ms: u64) -> bool {
        let open = match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms >= last.saturating_add(self.min_interval_ms),
        };
        if open {
            self.last_accepted_ms = Some(now_ms);
        }
        open
    }

    /// Like [`try_accept`](Self::try_accept), but a click right after a touch is
    /// consumed without reaching the interval check.
    pub fn try_accept_from(&mut self, source: TriggerSource, now_ms: u64) -> bool {
        match source {
            TriggerSource::Touch => self.touch_pending = true,
            TriggerSource::Click if self.touch_pending => {
                self.touch_pending = false;
                return false;
            }
            TriggerSource::Click | TriggerSource::Key => {}
        }
        self.try_accept(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_accepted() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept(0));
    }

    #[test]
    fn test_window() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_001));
        assert!(!gate.try_accept(1_299));
        assert!(gate.try_accept(1_300));
        assert!(!gate.try_accept(1_450));
        assert!(gate.try_accept(1_600));
    }

    #[test]
    fn test_rejected_triggers_do_not_extend_window() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept(0));
        for t in (10..300).step_by(10) {
            assert!(!gate.try_accept(t));
        }
        assert!(gate.try_accept(300));
    }

    #[test]
    fn test_clock_going_backwards_is_rejected() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept(5_000));
        assert!(!gate.try_accept(4_000));
    }

    #[test]
    fn test_click_after_touch_is_consumed() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept_from(TriggerSource::Touch, 10_000));
        // a long press: the synthesized click lands outside the interval
        assert!(!gate.try_accept_from(TriggerSource::Click, 10_350));
        // only one click is swallowed per touch
        assert!(gate.try_accept_from(TriggerSource::Click, 11_000));
    }

    #[test]
    fn test_keys_do_not_consume_pending_click() {
        let mut gate = TriggerGate::new(300);
        assert!(gate.try_accept_from(TriggerSource::Touch, 0));
        assert!(gate.try_accept_from(TriggerSource::Key, 400));
        assert!(!gate.try_accept_from(TriggerSource::Click, 800));
        assert!(gate.try_accept_from(TriggerSource::Click, 1_200));
    }

    #[test]
    fn test_zero_interval_accepts_everything() {
        let mut gate = TriggerGate::new(0);
        assert!(gate.try_accept(10));
        assert!(gate.try_accept(10));
    }
}
