use libs::utils::WaitPolicy;
use serde::Deserialize;
use x::sensor::MAX_FIRMWARE_VERSION;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Waits {
    pub reset: WaitPolicy,
    pub reboot: WaitPolicy,
    pub firmware: WaitPolicy,
    pub reading: WaitPolicy,
}

impl Default for Waits {
    fn default() -> Self {
        Self {
            reset: WaitPolicy::secs(15, 1),
            reboot: WaitPolicy::secs(10, 1),
            firmware: WaitPolicy::secs(13, 1),
            reading: WaitPolicy::secs(3, 1),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SuiteSettings {
    pub max_firmware_version: u8,
    pub new_name: String,
    pub reading_interval: u32,
    pub waits: Waits,
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            max_firmware_version: MAX_FIRMWARE_VERSION,
            new_name: "new_name".to_string(),
            reading_interval: 1,
            waits: Waits::default(),
        }
    }
}
