//! Turns a forecast payload into a [`RainReading`].
//!
//! Precedence: the `current` block when it carries `precipitation` or `rain`,
//! then the first `hourly.precipitation` entry, then a dry reading that says
//! nothing usable was found.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::{error::PollError, model::RainReading};

pub const NO_PRECIPITATION_FIELDS: &str = "no precipitation fields found";

#[derive(Debug, Default, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default, deserialize_with = "lenient")]
    current: Option<Current>,
    #[serde(default, deserialize_with = "lenient")]
    hourly: Option<Hourly>,
}

/// Outer `Option`: key present. Inner `Option`: value non-null.
#[derive(Debug, Deserialize)]
struct Current {
    #[serde(default, deserialize_with = "present")]
    precipitation: Option<Option<Millimetres>>,
    #[serde(default, deserialize_with = "present")]
    rain: Option<Option<Millimetres>>,
}

#[derive(Debug, Deserialize)]
struct Hourly {
    #[serde(default)]
    time: Vec<Option<String>>,
    #[serde(default)]
    precipitation: Vec<Option<Millimetres>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Millimetres {
    Number(f64),
    Text(String),
}

impl Millimetres {
    fn value(&self, field: &str) -> Result<f64, PollError> {
        match self {
            Millimetres::Number(n) => Ok(*n),
            Millimetres::Text(s) if s.trim().is_empty() => Ok(0.0),
            Millimetres::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| PollError::Parse(format!("{field} is not numeric: {s:?}"))),
        }
    }
}

/// A section with the wrong shape is treated as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub fn rain_status(data: &Value) -> Result<RainReading, PollError> {
    // Non-object payloads carry nothing usable.
    let response = OpenMeteoResponse::deserialize(data).unwrap_or_default();

    if let Some(current) = &response.current {
        if current.precipitation.is_some() || current.rain.is_some() {
            return from_current(current);
        }
    }

    if let Some(hourly) = &response.hourly {
        if let Some(first) = hourly.precipitation.first() {
            return from_hourly(hourly, first.as_ref());
        }
    }

    Ok(RainReading::new(false, NO_PRECIPITATION_FIELDS))
}

fn from_current(current: &Current) -> Result<RainReading, PollError> {
    let precip = millimetres(
        current.precipitation.as_ref().and_then(Option::as_ref),
        "current.precipitation",
    )?;
    let rain = millimetres(current.rain.as_ref().and_then(Option::as_ref), "current.rain")?;

    Ok(RainReading::new(
        precip > 0.0 || rain > 0.0,
        format!("current precip={}mm, rain={}mm", float_repr(precip), float_repr(rain)),
    ))
}

fn from_hourly(hourly: &Hourly, first: Option<&Millimetres>) -> Result<RainReading, PollError> {
    let precip = millimetres(first, "hourly.precipitation[0]")?;

    let time = hourly
        .time
        .first()
        .and_then(Option::as_deref)
        .unwrap_or("unknown");

    Ok(RainReading::new(
        precip > 0.0,
        format!("hourly[0] {time} precip={}mm", float_repr(precip)),
    ))
}

/// Missing and null values count as 0.0.
fn millimetres(value: Option<&Millimetres>, field: &str) -> Result<f64, PollError> {
    value.map_or(Ok(0.0), |v| v.value(field))
}

/// Float text as the rest of the tooling prints it: `0.0`, `1.25`, `1e-05`, `1e+16`.
fn float_repr(v: f64) -> String {
    let debug = format!("{v:?}");
    match debug.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => debug,
    }
}
