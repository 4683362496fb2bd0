use std::time::Duration;

use log::info;
use serde_json::json;
use tokio::time::sleep;
use x::{rpc::RpcErrorKind, sensor::REBOOT_REPLY};

use super::expect_rpc_error;
use crate::{
    error::{ensure, CheckError},
    suite::Suite,
};

const REFUSED_INTERVALS: [i64; 2] = [0, -1];

pub(crate) async fn sanity(suite: &Suite) -> Result<(), CheckError> {
    let sensor_info = suite.client.get_info().await?;
    info!("sensor info: {:?}", sensor_info);

    let sensor_reading = suite.client.get_reading().await?;
    info!("sensor reading: {}", sensor_reading);
    ensure(
        sensor_reading.is_finite(),
        "Sensor doesn't seem to register temperature",
    )
}

pub(crate) async fn reboot(suite: &Suite) -> Result<(), CheckError> {
    info!("Get sensor info before reboot");
    let before = suite.client.get_info().await?;

    info!("Reboot sensor");
    let reply = suite.client.reboot().await?;
    ensure(reply == json!(REBOOT_REPLY), format!("Sensor did not reboot: {}", reply))?;

    info!("Wait for sensor to come back online and get sensor info after reboot");
    let after = suite
        .wait_for_info(suite.settings.waits.reboot, "reboot")
        .await?;

    ensure(
        before == after,
        format!(
            "Sensor info after reboot does not match sensor info before reboot: {:?} != {:?}",
            after, before
        ),
    )
}

pub(crate) async fn set_name(suite: &Suite) -> Result<(), CheckError> {
    let new_name = suite.settings.new_name.as_str();

    info!("Set sensor name to \"{}\"", new_name);
    suite.client.set_name(new_name).await?;

    let current = suite.client.get_info().await?;
    ensure(
        current.name() == new_name,
        format!(
            "Current sensor name \"{}\" does not match the name set \"{}\"",
            current.name(),
            new_name
        ),
    )
}

pub(crate) async fn empty_name(suite: &Suite) -> Result<(), CheckError> {
    let before = suite.client.get_info().await?;

    info!("Set sensor name to an empty string");
    expect_rpc_error(suite.client.set_name("").await, RpcErrorKind::MethodExecution)?;

    let after = suite.client.get_info().await?;
    ensure(
        before.name() == after.name(),
        format!(
            "Sensor name changed from \"{}\" to \"{}\" after a refused update",
            before.name(),
            after.name()
        ),
    )
}

pub(crate) async fn set_reading_interval(suite: &Suite) -> Result<(), CheckError> {
    let interval = suite.settings.reading_interval;

    info!("Set sensor reading interval to {}", interval);
    suite.client.set_reading_interval(interval.into()).await?;

    let current = suite.client.get_info().await?;
    ensure(
        current.reading_interval() == interval,
        format!(
            "Sensor reading interval is {} instead of {}",
            current.reading_interval(),
            interval
        ),
    )?;

    info!("Get sensor reading");
    let before = suite.client.get_reading().await?;

    info!("Wait for {}s and get sensor reading", interval);
    sleep(Duration::from_secs(interval.into())).await;
    let after = suite
        .settings
        .waits
        .reading
        .wait(|| suite.client.get_reading(), |r| *r != before)
        .await;

    ensure(
        after.is_some(),
        format!("Sensor reading stayed at {} across the reading interval", before),
    )
}

pub(crate) async fn invalid_reading_interval(suite: &Suite) -> Result<(), CheckError> {
    let before = suite.client.get_info().await?;

    for interval in REFUSED_INTERVALS {
        info!("Set sensor reading interval to {}", interval);
        expect_rpc_error(
            suite.client.set_reading_interval(interval).await,
            RpcErrorKind::MethodExecution,
        )?;

        let after = suite.client.get_info().await?;
        ensure(
            before.reading_interval() == after.reading_interval(),
            format!(
                "Sensor reading interval changed from {} to {} after refusing {}",
                before.reading_interval(),
                after.reading_interval(),
                interval
            ),
        )?;
    }
    Ok(())
}

pub(crate) async fn get_methods(suite: &Suite) -> Result<(), CheckError> {
    let methods = suite.client.get_methods().await?;
    info!("sensor methods: {}", methods);
    ensure(!methods.is_null(), "Sensor answered get_methods with null")
}
