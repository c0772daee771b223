use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, RainReading, error::PollError, provider::openmeteo::OpenMeteoSource};

pub mod openmeteo;

/// Anything that can report whether it is raining right now at the configured spot.
#[async_trait]
pub trait RainSource: Send + Sync + Debug {
    async fn fetch_reading(&self) -> Result<RainReading, PollError>;
}

#[async_trait]
impl<T: RainSource + ?Sized> RainSource for Box<T> {
    async fn fetch_reading(&self) -> Result<RainReading, PollError> {
        (**self).fetch_reading().await
    }
}

/// Construct the Open-Meteo source for the configured coordinates.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn RainSource>> {
    let source = OpenMeteoSource::new(config.latitude, config.longitude)?;
    Ok(Box::new(source))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
