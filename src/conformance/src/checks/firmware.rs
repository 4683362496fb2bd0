use log::info;
use serde_json::json;
use x::sensor::LATEST_FIRMWARE_REPLY;

use crate::{
    error::{ensure, CheckError},
    suite::Suite,
};

pub(crate) async fn update_firmware(suite: &Suite) -> Result<(), CheckError> {
    let max = suite.settings.max_firmware_version;

    let mut version = suite.client.get_info().await?.firmware_version();
    info!("sensor firmware version is {}, latest is {}", version, max);
    while version < max {
        version = update_once(suite, version).await?;
    }

    ensure(
        version == max,
        format!("Sensor is at firmware version {} instead of {}", version, max),
    )?;

    info!("Request another firmware update");
    let reply = suite.client.update_firmware().await?;
    let current = suite.client.get_info().await?.firmware_version();

    ensure(
        reply == json!(LATEST_FIRMWARE_REPLY),
        format!(
            "Sensor didn't respond properly to an update past the latest version: {}",
            reply
        ),
    )?;
    ensure(
        current == version,
        format!(
            "Sensor changed its firmware version from {} to {} while already at the latest",
            version, current
        ),
    )
}

// One update: the version must move by exactly one.
async fn update_once(suite: &Suite, original: u8) -> Result<u8, CheckError> {
    info!("Request firmware update from version {}", original);
    suite.client.update_firmware().await?;

    let current = suite
        .settings
        .waits
        .firmware
        .wait(
            || suite.client.get_info(),
            |info| info.firmware_version() != original,
        )
        .await
        .ok_or(CheckError::Timeout {
            what: "firmware update",
            tries: suite.settings.waits.firmware.tries,
        })?
        .firmware_version();

    ensure(
        current == original + 1,
        format!(
            "Firmware update went from {} to {} instead of {}",
            original,
            current,
            original + 1
        ),
    )?;
    Ok(current)
}
