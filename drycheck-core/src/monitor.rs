use crate::model::{MonitorState, RainReading};

/// Decide whether `reading` ends a rain spell and compute the next state.
///
/// Only the raining → dry edge notifies. With `alert_once` set, a dry spell that
/// already notified stays quiet until a raining reading re-arms it.
pub fn evaluate(
    previous: MonitorState,
    reading: &RainReading,
    alert_once: bool,
) -> (MonitorState, bool) {
    let should_notify =
        previous.was_raining && !reading.raining && (!alert_once || !previous.notified);

    let notified = if reading.raining {
        false
    } else if should_notify && alert_once {
        true
    } else {
        previous.notified
    };

    (MonitorState { was_raining: reading.raining, notified }, should_notify)
}

/// Owns the transition state for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct RainMonitor {
    state: MonitorState,
    alert_once: bool,
}

impl RainMonitor {
    pub fn new(alert_once: bool) -> Self {
        Self { state: MonitorState::default(), alert_once }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn alert_once(&self) -> bool {
        self.alert_once
    }

    /// Feed one reading in; returns true when a notification should fire.
    pub fn observe(&mut self, reading: &RainReading) -> bool {
        let (next, should_notify) = evaluate(self.state, reading, self.alert_once);
        self.state = next;
        should_notify
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry() -> RainReading {
        RainReading::new(false, "test")
    }

    fn wet() -> RainReading {
        RainReading::new(true, "test")
    }

    fn state(was_raining: bool, notified: bool) -> MonitorState {
        MonitorState { was_raining, notified }
    }

    #[test]
    fn rain_to_dry_notifies_and_marks_notified() {
        let (next, notify) = evaluate(state(true, false), &dry(), true);

        assert!(notify);
        assert_eq!(next, state(false, true));
    }

    #[test]
    fn repeated_dry_does_not_notify_again_under_alert_once() {
        let (next, notify) = evaluate(state(false, true), &dry(), true);

        assert!(!notify);
        assert_eq!(next, state(false, true));
    }

    #[test]
    fn alert_once_suppresses_edge_when_already_notified() {
        let (next, notify) = evaluate(state(true, true), &dry(), true);

        assert!(!notify);
        assert_eq!(next, state(false, true));
    }

    #[test]
    fn without_alert_once_every_edge_notifies() {
        let (next, notify) = evaluate(state(true, true), &dry(), false);
        assert!(notify);
        // notified is only tracked under alert_once
        assert_eq!(next, state(false, true));

        let (next, notify) = evaluate(state(true, false), &dry(), false);
        assert!(notify);
        assert_eq!(next, state(false, false));
    }

    #[test]
    fn without_alert_once_staying_dry_does_not_notify() {
        let (next, notify) = evaluate(state(false, false), &dry(), false);

        assert!(!notify);
        assert_eq!(next, state(false, false));
    }

    #[test]
    fn rain_resets_notified() {
        let (next, notify) = evaluate(state(false, true), &wet(), true);

        assert!(!notify);
        assert_eq!(next, state(true, false));
    }

    #[test]
    fn initial_state_reports_dry_start() {
        let mut monitor = RainMonitor::new(true);
        assert_eq!(monitor.state(), state(true, false));

        assert!(monitor.observe(&dry()));
        assert!(!monitor.observe(&dry()));
    }

    #[test]
    fn monitor_rearms_after_rain() {
        let mut monitor = RainMonitor::new(true);

        let fired: Vec<bool> = [wet(), dry(), dry(), wet(), wet(), dry()]
            .iter()
            .map(|r| monitor.observe(r))
            .collect();

        assert_eq!(fired, vec![false, true, false, false, false, true]);
    }
}
