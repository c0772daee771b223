use std::{future::Future, time::Duration};

use tracing::{error, info, warn};

use crate::{
    error::PollError,
    model::RainReading,
    monitor::RainMonitor,
    notify::{DRY_MESSAGE, DRY_TITLE, NotificationSink, NotifyOutcome},
    provider::RainSource,
};

/// What happened during one poll cycle.
#[derive(Debug)]
pub enum PollOutcome {
    Checked {
        reading: RainReading,
        notification: Option<NotifyOutcome>,
    },
    Failed(PollError),
}

impl PollOutcome {
    pub fn notified(&self) -> bool {
        matches!(
            self,
            PollOutcome::Checked { notification: Some(NotifyOutcome::Sent), .. }
        )
    }
}

/// Sequential fetch → evaluate → notify loop.
#[derive(Debug)]
pub struct Poller<S, N> {
    monitor: RainMonitor,
    source: S,
    sink: N,
    interval: Duration,
}

impl<S: RainSource, N: NotificationSink> Poller<S, N> {
    pub fn new(source: S, sink: N, interval: Duration, alert_once: bool) -> Self {
        Self { monitor: RainMonitor::new(alert_once), source, sink, interval }
    }

    pub fn monitor(&self) -> &RainMonitor {
        &self.monitor
    }

    /// One cycle. Errors are logged and returned as an outcome, never propagated.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let reading = match self.source.fetch_reading().await {
            Ok(reading) => reading,
            Err(err) => {
                error!("{}: {err}", err.category());
                return PollOutcome::Failed(err);
            }
        };

        info!("{reading}");

        let notification = if self.monitor.observe(&reading) {
            let outcome = self.sink.notify(DRY_TITLE, DRY_MESSAGE).await;
            match &outcome {
                NotifyOutcome::Sent => info!("Sent notification: {DRY_TITLE}"),
                NotifyOutcome::Failed(reason) => warn!("Notification failed: {reason}"),
            }
            Some(outcome)
        } else {
            None
        };

        PollOutcome::Checked { reading, notification }
    }

    /// Poll until `shutdown` resolves, sleeping `interval` between cycles.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.poll_once() => {}
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Stopping drycheck");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl RainSource for FailingSource {
        async fn fetch_reading(&self) -> Result<RainReading, PollError> {
            Err(PollError::Parse("unexpected payload".into()))
        }
    }

    #[derive(Debug)]
    struct DrySource;

    #[async_trait]
    impl RainSource for DrySource {
        async fn fetch_reading(&self) -> Result<RainReading, PollError> {
            Ok(RainReading::new(false, "always dry"))
        }
    }

    #[derive(Debug, Default)]
    struct BrokenSink {
        attempts: Mutex<u32>,
    }

    #[async_trait]
    impl NotificationSink for BrokenSink {
        async fn notify(&self, _title: &str, _message: &str) -> NotifyOutcome {
            *self.attempts.lock().unwrap() += 1;
            NotifyOutcome::Failed("no display".into())
        }
    }

    #[tokio::test]
    async fn source_error_leaves_state_untouched() {
        let mut poller =
            Poller::new(FailingSource, BrokenSink::default(), Duration::from_millis(1), true);
        let before = poller.monitor().state();

        let outcome = poller.poll_once().await;

        assert!(matches!(outcome, PollOutcome::Failed(PollError::Parse(_))));
        assert_eq!(poller.monitor().state(), before);
    }

    #[tokio::test]
    async fn notification_failure_is_absorbed() {
        let mut poller =
            Poller::new(DrySource, BrokenSink::default(), Duration::from_millis(1), true);

        let outcome = poller.poll_once().await;
        match outcome {
            PollOutcome::Checked { notification: Some(NotifyOutcome::Failed(reason)), .. } => {
                assert_eq!(reason, "no display");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!poller.poll_once().await.notified());

        // state still advanced, so alert_once suppresses the second dry reading
        assert_eq!(*poller.sink.attempts.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let mut poller =
            Poller::new(FailingSource, BrokenSink::default(), Duration::from_secs(3600), true);

        tokio::time::timeout(
            Duration::from_secs(5),
            poller.run(tokio::time::sleep(Duration::from_millis(20))),
        )
        .await
        .expect("run should return once shutdown resolves");
    }
}
