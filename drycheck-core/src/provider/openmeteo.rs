use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{error::PollError, model::RainReading, status::rain_status};

use super::{RainSource, truncate_body};

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    latitude: f64,
    longitude: f64,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Self::with_base_url(OPEN_METEO_BASE_URL, latitude, longitude)
    }

    pub fn with_base_url(base_url: &str, latitude: f64, longitude: f64) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            latitude,
            longitude,
            http,
        })
    }

    async fn fetch_forecast(&self) -> Result<serde_json::Value, PollError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", "precipitation,rain".to_string()),
                ("hourly", "precipitation".to_string()),
                ("forecast_days", "1".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(PollError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RainSource for OpenMeteoSource {
    async fn fetch_reading(&self) -> Result<RainReading, PollError> {
        let data = self.fetch_forecast().await?;
        rain_status(&data)
    }
}
