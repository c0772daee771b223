//! Core library for the `drycheck` rain monitor.
//!
//! This crate defines:
//! - Configuration loading (YAML or TOML)
//! - The raining → dry transition logic
//! - Parsing of Open-Meteo forecast payloads into rain readings
//! - Weather source and notification sink abstractions
//! - The sequential poll loop tying them together
//!
//! It is used by `drycheck-cli`, but can also be embedded elsewhere.

pub mod config;
pub mod error;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod poller;
pub mod provider;
pub mod status;

pub use config::{Config, ConfigFormat};
pub use error::PollError;
pub use model::{MonitorState, RainReading};
pub use monitor::{RainMonitor, evaluate};
pub use notify::{DesktopNotifier, NotificationSink, NotifyOutcome};
pub use poller::{PollOutcome, Poller};
pub use provider::{RainSource, source_from_config};
pub use status::rain_status;
