use clap::Args;
use libs::clients::SensorClient;
use serde::Serialize;

use crate::Error;

#[derive(Args)]
pub struct SetNameCmd {
    /// new device name
    name: String,
}

#[derive(Args)]
pub struct SetIntervalCmd {
    /// seconds between two readings
    #[arg(allow_negative_numbers = true)]
    interval: i64,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run_info_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.get_info().await?)
}

pub async fn run_reading_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.get_reading().await?)
}

pub async fn run_methods_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.get_methods().await?)
}

pub async fn run_set_name_cmd(cmd: &SetNameCmd, client: &SensorClient) -> Result<(), Error> {
    print_json(&client.set_name(&cmd.name).await?)
}

pub async fn run_set_interval_cmd(
    cmd: &SetIntervalCmd,
    client: &SensorClient,
) -> Result<(), Error> {
    print_json(&client.set_reading_interval(cmd.interval).await?)
}

pub async fn run_reset_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.reset_to_factory().await?)
}

pub async fn run_update_firmware_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.update_firmware().await?)
}

pub async fn run_reboot_cmd(client: &SensorClient) -> Result<(), Error> {
    print_json(&client.reboot().await?)
}
