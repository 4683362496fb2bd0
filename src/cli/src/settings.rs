use std::{fmt, time::Duration};

use conformance::SuiteSettings;
use libs::utils::config::humantime_duration;
use serde::Deserialize;

pub const DEFAULT_SENSOR_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_SENSOR_PORT: u16 = 9898;
pub const DEFAULT_SENSOR_PIN: &str = "0000";

#[derive(Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SensorSettings {
    pub host: String,
    pub port: u16,
    pub pin: String,
    #[serde(deserialize_with = "humantime_duration")]
    pub timeout: Duration,
}

// The pin stays out of logs.
impl fmt::Debug for SensorSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SensorSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("pin", &"****")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SENSOR_HOST.to_string(),
            port: DEFAULT_SENSOR_PORT,
            pin: DEFAULT_SENSOR_PIN.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub sensor: SensorSettings,
    pub suite: SuiteSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            sensor: SensorSettings::default(),
            suite: SuiteSettings::default(),
        }
    }
}

impl Settings {
    // Cli flags win over every config source
    pub fn override_sensor(&mut self, host: Option<&str>, port: Option<u16>, pin: Option<&str>) {
        if let Some(host) = host {
            self.sensor.host = host.to_string();
        }
        if let Some(port) = port {
            self.sensor.port = port;
        }
        if let Some(pin) = pin {
            self.sensor.pin = pin.to_string();
        }
    }

    /// `-d` once means debug, twice or more trace.
    pub fn log_level(&self, debug: u8) -> &str {
        match debug {
            0 => self.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    }
}
