use async_trait::async_trait;
use std::fmt::Debug;
use tokio::process::Command;

pub const DRY_TITLE: &str = "Dry Now";
pub const DRY_MESSAGE: &str = "Rain stopped — time to go out!";

/// Outcome of a best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Failed(String),
}

impl NotifyOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotifyOutcome::Sent)
    }
}

/// Where "it stopped raining" ends up. Implementations report failure instead of erroring.
#[async_trait]
pub trait NotificationSink: Send + Sync + Debug {
    async fn notify(&self, title: &str, message: &str) -> NotifyOutcome;
}

/// Desktop notification through `notify-send`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::with_program("notify-send")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for DesktopNotifier {
    async fn notify(&self, title: &str, message: &str) -> NotifyOutcome {
        match Command::new(&self.program).arg(title).arg(message).output().await {
            Ok(output) if output.status.success() => NotifyOutcome::Sent,
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                NotifyOutcome::Failed(format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ))
            }
            Err(err) => NotifyOutcome::Failed(format!("{} failed: {err}", self.program)),
        }
    }
}
