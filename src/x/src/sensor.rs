use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

pub const MIN_FIRMWARE_VERSION: u8 = 10;
pub const MAX_FIRMWARE_VERSION: u8 = 15;
pub const MIN_READING_INTERVAL: u32 = 1;

pub const REBOOT_REPLY: &str = "rebooting";
pub const LATEST_FIRMWARE_REPLY: &str = "already at latest firmware version";

pub const NAME_PARAM: &str = "name";
pub const INTERVAL_PARAM: &str = "interval";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SensorMethod {
    GetInfo,
    GetReading,
    SetName,
    GetMethods,
    SetReadingInterval,
    ResetToFactory,
    UpdateFirmware,
    Reboot,
}

impl SensorMethod {
    pub const ALL: [SensorMethod; 8] = [
        SensorMethod::GetInfo,
        SensorMethod::GetReading,
        SensorMethod::SetName,
        SensorMethod::GetMethods,
        SensorMethod::SetReadingInterval,
        SensorMethod::ResetToFactory,
        SensorMethod::UpdateFirmware,
        SensorMethod::Reboot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorMethod::GetInfo => "get_info",
            SensorMethod::GetReading => "get_reading",
            SensorMethod::SetName => "set_name",
            SensorMethod::GetMethods => "get_methods",
            SensorMethod::SetReadingInterval => "set_reading_interval",
            SensorMethod::ResetToFactory => "reset_to_factory",
            SensorMethod::UpdateFirmware => "update_firmware",
            SensorMethod::Reboot => "reboot",
        }
    }
}

impl fmt::Display for SensorMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(ThisError, Debug, PartialEq, Eq)]
#[error("unknown sensor method <{0}>")]
pub struct UnknownMethod(pub String);

impl FromStr for SensorMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[derive(ThisError, Debug, PartialEq, Eq)]
pub enum SensorInfoError {
    #[error("sensor info is not a valid object: {0}")]
    Shape(String),
    #[error("sensor {0} is empty")]
    EmptyField(&'static str),
    #[error(
        "sensor firmware version {0} is outside [{min}, {max}]",
        min = MIN_FIRMWARE_VERSION,
        max = MAX_FIRMWARE_VERSION
    )]
    FirmwareVersion(i64),
    #[error("sensor reading interval {0} is below {min}", min = MIN_READING_INTERVAL)]
    ReadingInterval(i64),
}

/// Validated snapshot of what `get_info` reports.
///
/// Only constructible through deserialization or [`SensorInfo::from_value`],
/// both of which reject empty identifiers and out-of-range numbers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "RawSensorInfo")]
pub struct SensorInfo {
    name: String,
    hid: String,
    model: String,
    firmware_version: u8,
    reading_interval: u32,
}

#[derive(Deserialize)]
struct RawSensorInfo {
    name: String,
    hid: String,
    model: String,
    firmware_version: i64,
    reading_interval: i64,
}

impl TryFrom<RawSensorInfo> for SensorInfo {
    type Error = SensorInfoError;

    fn try_from(raw: RawSensorInfo) -> Result<Self, Self::Error> {
        for (field, value) in [("name", &raw.name), ("hid", &raw.hid), ("model", &raw.model)] {
            if value.is_empty() {
                return Err(SensorInfoError::EmptyField(field));
            }
        }

        let firmware_version = u8::try_from(raw.firmware_version)
            .ok()
            .filter(|v| (MIN_FIRMWARE_VERSION..=MAX_FIRMWARE_VERSION).contains(v))
            .ok_or(SensorInfoError::FirmwareVersion(raw.firmware_version))?;

        let reading_interval = u32::try_from(raw.reading_interval)
            .ok()
            .filter(|v| *v >= MIN_READING_INTERVAL)
            .ok_or(SensorInfoError::ReadingInterval(raw.reading_interval))?;

        Ok(Self {
            name: raw.name,
            hid: raw.hid,
            model: raw.model,
            firmware_version,
            reading_interval,
        })
    }
}

impl SensorInfo {
    pub fn from_value(value: Value) -> Result<Self, SensorInfoError> {
        serde_json::from_value::<RawSensorInfo>(value)
            .map_err(|e| SensorInfoError::Shape(e.to_string()))?
            .try_into()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hid(&self) -> &str {
        &self.hid
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn firmware_version(&self) -> u8 {
        self.firmware_version
    }

    pub fn reading_interval(&self) -> u32 {
        self.reading_interval
    }
}
